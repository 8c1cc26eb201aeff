use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ComparisonReport, RankedPhrase, StyleProfile};

/// Overall judgement of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Large verbatim overlap.
    Critical,
    /// Overlap at or below the critical threshold.
    Authentic,
}

impl Verdict {
    /// `Critical` only when `score_percent` is strictly above `threshold`.
    pub fn from_score(score_percent: f64, threshold: f64) -> Self {
        if score_percent > threshold {
            Verdict::Critical
        } else {
            Verdict::Authentic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Critical => "CRITICAL",
            Verdict::Authentic => "AUTHENTIC",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Critical => "High structural overlap detected; large verbatim clusters found.",
            Verdict::Authentic => "Low structural overlap detected.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What was learned about one input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub source_name: String,
    pub token_count: usize,
    /// Digest of the normalized text.
    pub sha256_hex: String,
    pub style: StyleProfile,
}

/// Result of [`compare_documents`](crate::compare_documents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    pub reference: DocumentSummary,
    pub suspect: DocumentSummary,
    pub comparison: ComparisonReport,
    pub verdict: Verdict,
}

impl ForensicReport {
    pub fn score(&self) -> f64 {
        self.comparison.similarity_score_percent
    }

    pub fn ranked_phrases(&self) -> &[RankedPhrase] {
        &self.comparison.ranked_phrases
    }

    /// Both documents normalize to the same text.
    pub fn identical_content(&self) -> bool {
        self.reference.sha256_hex == self.suspect.sha256_hex
    }
}
