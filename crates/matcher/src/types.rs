use perceptual::PerceptualError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the membership index, tracker and ranking.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Number of ranked phrases to keep.
    #[serde(default = "MatchConfig::default_top_k")]
    pub top_k: usize,
    /// Size of the approximate filter's bit array.
    #[serde(default = "MatchConfig::default_filter_bits")]
    pub filter_bits: u32,
    /// Initial slot count of each open-addressed table. Tables grow on demand.
    #[serde(default = "MatchConfig::default_table_capacity")]
    pub table_capacity: usize,
    /// Hard ceiling on table growth. Exceeding it is
    /// [`MatchError::CapacityExceeded`].
    #[serde(default = "MatchConfig::default_max_table_capacity")]
    pub max_table_capacity: usize,
}

impl MatchConfig {
    pub(crate) fn default_top_k() -> usize {
        5
    }

    pub(crate) fn default_filter_bits() -> u32 {
        1_000_000
    }

    pub(crate) fn default_table_capacity() -> usize {
        1024
    }

    pub(crate) fn default_max_table_capacity() -> usize {
        1 << 28
    }

    /// Largest accepted `table_capacity` / `max_table_capacity`.
    pub const TABLE_CAPACITY_LIMIT: usize = 1 << 32;

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_filter_bits(mut self, filter_bits: u32) -> Self {
        self.filter_bits = filter_bits;
        self
    }

    pub fn with_table_capacity(mut self, initial: usize, max: usize) -> Self {
        self.table_capacity = initial;
        self.max_table_capacity = max;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version == 0 {
            return Err(MatchError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(MatchError::InvalidConfig(
                "top_k must be greater than zero".into(),
            ));
        }
        if self.filter_bits == 0 {
            return Err(MatchError::InvalidConfig(
                "filter_bits must be greater than zero".into(),
            ));
        }
        if self.table_capacity == 0 {
            return Err(MatchError::InvalidConfig(
                "table_capacity must be greater than zero".into(),
            ));
        }
        if self.max_table_capacity > Self::TABLE_CAPACITY_LIMIT {
            return Err(MatchError::InvalidConfig(format!(
                "max_table_capacity must be <= {}",
                Self::TABLE_CAPACITY_LIMIT
            )));
        }
        if self.max_table_capacity < self.table_capacity {
            return Err(MatchError::InvalidConfig(
                "max_table_capacity must be >= table_capacity".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            top_k: Self::default_top_k(),
            filter_bits: Self::default_filter_bits(),
            table_capacity: Self::default_table_capacity(),
            max_table_capacity: Self::default_max_table_capacity(),
        }
    }
}

/// One entry of the frequency ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedPhrase {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Number of suspect windows that matched this phrase.
    pub frequency: usize,
    /// Window text as first seen in the suspect document.
    pub phrase: String,
}

impl RankedPhrase {
    /// Phrase text for display, cut to `max_chars` characters.
    ///
    /// A truncated phrase ends with `…`; the stored phrase is never modified.
    pub fn display(&self, max_chars: Option<usize>) -> String {
        match max_chars {
            Some(max) if self.phrase.chars().count() > max => {
                let mut out: String = self.phrase.chars().take(max).collect();
                out.push('…');
                out
            }
            _ => self.phrase.clone(),
        }
    }
}

/// Counters collected during the suspect scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanStats {
    /// Suspect windows examined.
    pub windows_scanned: usize,
    /// Windows confirmed by both the filter and the exact set, repeats included.
    pub confirmed_matches: usize,
    /// Windows the approximate filter rejected outright.
    pub filter_rejections: usize,
    /// Windows that passed the filter but were absent from the exact set.
    pub filter_false_positives: usize,
    /// Distinct fingerprints among the confirmed matches.
    pub distinct_matches: usize,
}

/// Result of comparing a suspect document against a reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    /// `confirmed_matches / total_distinct_reference_fingerprints * 100`.
    /// Can exceed 100 when the suspect repeats matched phrases.
    pub similarity_score_percent: f64,
    /// Most frequent matched phrases, highest frequency first.
    pub ranked_phrases: Vec<RankedPhrase>,
    pub total_distinct_reference_fingerprints: usize,
    pub stats: ScanStats,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Fingerprinting failed.
    #[error("fingerprint error: {0}")]
    Perceptual(#[from] PerceptualError),
    /// The reference produced no winnowed fingerprints, so no score exists.
    #[error("reference signature is empty; document too short for n-gram and window sizes")]
    EmptyReferenceSignature,
    /// A signature was computed with different hashing parameters than the
    /// matcher's own.
    #[error("{role} signature incompatible: {detail}")]
    IncompatibleSignature { role: &'static str, detail: String },
    /// A table would need to grow past its configured ceiling.
    #[error("fingerprint table capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.filter_bits, 1_000_000);
    }

    #[test]
    fn invalid_top_k_rejected() {
        let err = MatchConfig::default().with_top_k(0).validate().unwrap_err();
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("top_k")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_capacities_rejected() {
        let err = MatchConfig::default()
            .with_table_capacity(64, 32)
            .validate()
            .unwrap_err();
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_table_capacity")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_capacities_rejected() {
        let huge = 1usize << 60;
        let err = MatchConfig::default()
            .with_table_capacity(huge, huge)
            .validate()
            .unwrap_err();
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_table_capacity")),
            other => panic!("unexpected error: {other}"),
        }

        let at_limit = MatchConfig::default()
            .with_table_capacity(1024, MatchConfig::TABLE_CAPACITY_LIMIT);
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn zero_filter_bits_rejected() {
        assert!(MatchConfig::default().with_filter_bits(0).validate().is_err());
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"version": 1, "top_k": 3}"#).unwrap();
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.table_capacity, MatchConfig::default_table_capacity());
    }

    #[test]
    fn display_marks_truncation() {
        let phrase = RankedPhrase {
            rank: 1,
            frequency: 2,
            phrase: "the quick brown".into(),
        };
        assert_eq!(phrase.display(None), "the quick brown");
        assert_eq!(phrase.display(Some(40)), "the quick brown");
        assert_eq!(phrase.display(Some(9)), "the quick…");
    }
}
