//! Reference-side membership index: approximate filter plus exact set.

use perceptual::{Fingerprint, Signature};

use crate::filter::ApproximateFilter;
use crate::table::FingerprintTable;
use crate::types::{MatchConfig, MatchError};

/// Outcome of looking up one suspect fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The filter ruled the fingerprint out; the exact set was not consulted.
    FilterRejected,
    /// The filter passed but the exact set does not hold the fingerprint.
    FalsePositive,
    /// Present in the reference signature.
    Confirmed,
}

/// Built once from the reference document's winnowed selections.
///
/// Only the exact set decides membership; the filter just skips most of
/// the set probes for fingerprints that cannot be present.
#[derive(Debug, Clone)]
pub struct MembershipIndex {
    filter: ApproximateFilter,
    set: FingerprintTable<()>,
}

impl MembershipIndex {
    pub fn new(cfg: &MatchConfig) -> Result<Self, MatchError> {
        Ok(Self {
            filter: ApproximateFilter::new(cfg.filter_bits),
            set: FingerprintTable::with_capacity(cfg.table_capacity, cfg.max_table_capacity)?,
        })
    }

    /// Insert every selection; duplicates collapse in the exact set.
    pub fn build<I>(selections: I, cfg: &MatchConfig) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = Fingerprint>,
    {
        let mut index = Self::new(cfg)?;
        for fp in selections {
            index.insert(fp)?;
        }
        Ok(index)
    }

    pub fn from_signature(signature: &Signature, cfg: &MatchConfig) -> Result<Self, MatchError> {
        Self::build(signature.selected(), cfg)
    }

    /// Returns `Ok(false)` if the fingerprint was already present.
    pub fn insert(&mut self, fp: Fingerprint) -> Result<bool, MatchError> {
        let inserted = self.set.insert(fp, ())?;
        self.filter.add(&fp);
        Ok(inserted)
    }

    pub fn lookup(&self, fp: &Fingerprint) -> Lookup {
        if !self.filter.check(fp) {
            Lookup::FilterRejected
        } else if self.set.contains(fp) {
            Lookup::Confirmed
        } else {
            Lookup::FalsePositive
        }
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.lookup(fp) == Lookup::Confirmed
    }

    /// Number of distinct reference fingerprints.
    pub fn distinct_len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn filter(&self) -> &ApproximateFilter {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(h1: u64, h2: u64) -> Fingerprint {
        Fingerprint::new(h1, h2)
    }

    #[test]
    fn build_deduplicates_selections() {
        let cfg = MatchConfig::default();
        let index = MembershipIndex::build([fp(1, 1), fp(2, 2), fp(1, 1)], &cfg).unwrap();
        assert_eq!(index.distinct_len(), 2);
        assert!(index.contains(&fp(1, 1)));
        assert!(index.contains(&fp(2, 2)));
    }

    #[test]
    fn lookup_distinguishes_filter_and_set() {
        // A 10-bit filter makes false positives easy to construct.
        let cfg = MatchConfig::default().with_filter_bits(10);
        let index = MembershipIndex::build([fp(1, 2)], &cfg).unwrap();

        assert_eq!(index.lookup(&fp(1, 2)), Lookup::Confirmed);
        assert_eq!(index.lookup(&fp(11, 12)), Lookup::FalsePositive);
        assert_eq!(index.lookup(&fp(3, 4)), Lookup::FilterRejected);
    }

    #[test]
    fn h2_mismatch_is_not_a_match() {
        let cfg = MatchConfig::default();
        let index = MembershipIndex::build([fp(42, 7)], &cfg).unwrap();
        assert!(!index.contains(&fp(42, 8)));
    }

    #[test]
    fn capacity_ceiling_surfaces_from_build() {
        let cfg = MatchConfig::default().with_table_capacity(2, 4);
        let err = MembershipIndex::build((0..10).map(|i| fp(i, i)), &cfg).unwrap_err();
        assert_eq!(err, MatchError::CapacityExceeded { capacity: 4 });
    }

    #[test]
    fn empty_index_reports_empty() {
        let index = MembershipIndex::build(std::iter::empty(), &MatchConfig::default()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.lookup(&fp(5, 5)), Lookup::FilterRejected);
    }
}
