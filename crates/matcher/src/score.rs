use crate::types::MatchError;

/// `confirmed_matches / distinct_reference * 100`.
///
/// Matches are counted per suspect window, repeats included, so the result
/// exceeds 100 when the suspect repeats matched phrases.
pub fn similarity_score(confirmed_matches: usize, distinct_reference: usize) -> Result<f64, MatchError> {
    if distinct_reference == 0 {
        return Err(MatchError::EmptyReferenceSignature);
    }
    Ok(confirmed_matches as f64 / distinct_reference as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_overlap_is_one_hundred() {
        assert_eq!(similarity_score(3, 3).unwrap(), 100.0);
    }

    #[test]
    fn no_matches_is_zero() {
        assert_eq!(similarity_score(0, 12).unwrap(), 0.0);
    }

    #[test]
    fn repeats_push_past_one_hundred() {
        assert_eq!(similarity_score(9, 4).unwrap(), 225.0);
    }

    #[test]
    fn empty_reference_is_an_error() {
        assert_eq!(similarity_score(5, 0), Err(MatchError::EmptyReferenceSignature));
    }
}
