//! Occurrence counts for matched suspect phrases.

use perceptual::Fingerprint;
use serde::{Deserialize, Serialize};

use crate::table::FingerprintTable;
use crate::types::{MatchConfig, MatchError};

/// A matched fingerprint with its representative phrase and count.
///
/// `phrase` and `first_seen` are fixed by the first match; later matches
/// only bump `count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub fingerprint: Fingerprint,
    pub phrase: String,
    pub count: usize,
    /// Suspect window offset of the first match.
    pub first_seen: usize,
}

#[derive(Debug, Clone)]
pub struct FrequencyTracker {
    table: FingerprintTable<FrequencyEntry>,
    total: usize,
}

impl FrequencyTracker {
    pub fn new(cfg: &MatchConfig) -> Result<Self, MatchError> {
        Ok(Self {
            table: FingerprintTable::with_capacity(cfg.table_capacity, cfg.max_table_capacity)?,
            total: 0,
        })
    }

    /// Record one confirmed match at suspect window `position`.
    ///
    /// `phrase` is only invoked for a fingerprint's first match. Returns the
    /// updated count.
    pub fn record(
        &mut self,
        fingerprint: Fingerprint,
        position: usize,
        phrase: impl FnOnce() -> String,
    ) -> Result<usize, MatchError> {
        let (entry, _) = self.table.get_or_insert_with(fingerprint, || FrequencyEntry {
            fingerprint,
            phrase: phrase(),
            count: 0,
            first_seen: position,
        })?;
        entry.count += 1;
        self.total += 1;
        Ok(entry.count)
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&FrequencyEntry> {
        self.table.get(fingerprint)
    }

    /// All entries, in table order.
    pub fn entries(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.table.iter().map(|(_, entry)| entry)
    }

    /// Number of distinct fingerprints recorded.
    pub fn distinct(&self) -> usize {
        self.table.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }
}
