//! Surface stylometry over the raw (un-normalized) text.

use serde::{Deserialize, Serialize};

/// Two coarse writing-style measures for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Whitespace-separated words per sentence.
    pub avg_sentence_len: f64,
    /// Distinct words over total words, in `0.0..=1.0`.
    pub vocab_richness: f64,
}

impl StyleProfile {
    /// Sentences are the non-blank pieces between runs of `.`, `!` and `?`.
    /// Words are split on whitespace and compared exactly as written.
    pub fn analyze(text: &str) -> Self {
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|piece| !piece.trim().is_empty())
            .count();
        let words: Vec<&str> = text.split_whitespace().collect();

        let avg_sentence_len = if sentences == 0 {
            0.0
        } else {
            words.len() as f64 / sentences as f64
        };

        let vocab_richness = if words.is_empty() {
            0.0
        } else {
            let mut distinct = words.clone();
            distinct.sort_unstable();
            distinct.dedup();
            distinct.len() as f64 / words.len() as f64
        };

        Self {
            avg_sentence_len,
            vocab_richness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(StyleProfile::analyze(""), StyleProfile::default());
        assert_eq!(StyleProfile::analyze(" \n\t "), StyleProfile::default());
    }

    #[test]
    fn punctuation_runs_count_once() {
        let profile = StyleProfile::analyze("One two three. Four five!?! Six");
        assert_eq!(profile.avg_sentence_len, 2.0);
        assert_eq!(profile.vocab_richness, 1.0);
    }

    #[test]
    fn repeated_words_lower_richness() {
        let profile = StyleProfile::analyze("the cat saw the dog");
        assert_eq!(profile.avg_sentence_len, 5.0);
        assert_eq!(profile.vocab_richness, 0.8);
    }

    #[test]
    fn words_are_case_sensitive() {
        let profile = StyleProfile::analyze("Rust rust");
        assert_eq!(profile.vocab_richness, 1.0);
    }

    #[test]
    fn punctuation_only_has_no_sentences() {
        let profile = StyleProfile::analyze("...!!!");
        assert_eq!(profile.avg_sentence_len, 0.0);
        assert_eq!(profile.vocab_richness, 1.0);
    }
}
