//! Open-addressed table keyed by full fingerprint equality.
//!
//! Probing starts at `h1 mod capacity` and advances one slot at a time,
//! wrapping at the end. The table doubles before its load factor would pass
//! 3/4, so at least one slot is always empty and every probe terminates.
//! Growth past the configured ceiling is refused with
//! [`MatchError::CapacityExceeded`] and leaves the table unchanged.

use perceptual::Fingerprint;

use crate::types::MatchError;

#[derive(Debug, Clone)]
pub struct FingerprintTable<V> {
    slots: Vec<Option<(Fingerprint, V)>>,
    len: usize,
    max_capacity: usize,
}

impl<V> FingerprintTable<V> {
    /// Create a table with `capacity` slots that may grow up to `max_capacity`.
    pub fn with_capacity(capacity: usize, max_capacity: usize) -> Result<Self, MatchError> {
        if capacity == 0 || max_capacity < capacity {
            return Err(MatchError::InvalidConfig(format!(
                "table capacity {capacity} must be in 1..={max_capacity}"
            )));
        }
        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
            max_capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot index holding `fp`, or the empty slot where it would go.
    fn probe(&self, fp: &Fingerprint) -> (usize, bool) {
        let capacity = self.slots.len();
        let mut idx = (fp.h1 % capacity as u64) as usize;
        loop {
            match &self.slots[idx] {
                None => return (idx, false),
                Some((key, _)) if key == fp => return (idx, true),
                Some(_) => idx = (idx + 1) % capacity,
            }
        }
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.probe(fp).1
    }

    pub fn get(&self, fp: &Fingerprint) -> Option<&V> {
        match self.probe(fp) {
            (idx, true) => self.slots[idx].as_ref().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Insert `value` under `fp`. A present key is left untouched and
    /// `Ok(false)` is returned.
    pub fn insert(&mut self, fp: Fingerprint, value: V) -> Result<bool, MatchError> {
        let (_, inserted) = self.get_or_insert_with(fp, || value)?;
        Ok(inserted)
    }

    /// Look up `fp`, inserting `make()` first if it is absent.
    ///
    /// Returns the stored value and whether it was just inserted.
    pub fn get_or_insert_with(
        &mut self,
        fp: Fingerprint,
        make: impl FnOnce() -> V,
    ) -> Result<(&mut V, bool), MatchError> {
        let (mut idx, found) = self.probe(&fp);
        if !found {
            if self.needs_growth() {
                self.grow()?;
                idx = self.probe(&fp).0;
            }
            self.len += 1;
        }
        let (_, value) = self.slots[idx].get_or_insert_with(|| (fp, make()));
        Ok((value, !found))
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }

    fn needs_growth(&self) -> bool {
        (self.len + 1) * 4 > self.slots.len() * 3
    }

    fn grow(&mut self) -> Result<(), MatchError> {
        let current = self.slots.len();
        let mut target = current;
        while (self.len + 1) * 4 > target * 3 {
            let next = target.saturating_mul(2).min(self.max_capacity);
            if next <= target {
                return Err(MatchError::CapacityExceeded { capacity: current });
            }
            target = next;
        }

        tracing::debug!(from = current, to = target, entries = self.len, "table_grow");
        let old = std::mem::replace(&mut self.slots, empty_slots(target));
        for (key, value) in old.into_iter().flatten() {
            let (idx, _) = self.probe(&key);
            self.slots[idx] = Some((key, value));
        }
        Ok(())
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Option<(Fingerprint, V)>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(h1: u64, h2: u64) -> Fingerprint {
        Fingerprint::new(h1, h2)
    }

    #[test]
    fn insert_then_contains() {
        let mut table = FingerprintTable::with_capacity(8, 1024).unwrap();
        assert!(table.insert(fp(1, 2), ()).unwrap());
        assert!(table.contains(&fp(1, 2)));
        assert!(!table.contains(&fp(1, 3)));
        assert!(!table.contains(&fp(2, 2)));
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut table = FingerprintTable::with_capacity(8, 1024).unwrap();
        assert!(table.insert(fp(5, 5), "first").unwrap());
        assert!(!table.insert(fp(5, 5), "second").unwrap());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&fp(5, 5)), Some(&"first"));
    }

    #[test]
    fn colliding_h1_probes_linearly() {
        let mut table = FingerprintTable::with_capacity(16, 16).unwrap();
        // Same start slot, different h2.
        for h2 in 0..5 {
            table.insert(fp(3, h2), h2).unwrap();
        }
        for h2 in 0..5 {
            assert_eq!(table.get(&fp(3, h2)), Some(&h2));
        }
        assert!(!table.contains(&fp(3, 99)));
    }

    #[test]
    fn probe_wraps_around_the_end() {
        let mut table = FingerprintTable::with_capacity(8, 8).unwrap();
        table.insert(fp(7, 0), ()).unwrap();
        table.insert(fp(15, 0), ()).unwrap();
        assert!(table.contains(&fp(7, 0)));
        assert!(table.contains(&fp(15, 0)));
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut table = FingerprintTable::with_capacity(1, 1 << 20).unwrap();
        for i in 0..10_000u64 {
            table.insert(fp(i * 7919, i), i).unwrap();
        }
        assert_eq!(table.len(), 10_000);
        assert!(table.capacity() * 3 >= table.len() * 4);
        for i in 0..10_000u64 {
            assert_eq!(table.get(&fp(i * 7919, i)), Some(&i));
        }
    }

    #[test]
    fn ceiling_is_reported_not_looped() {
        let mut table = FingerprintTable::with_capacity(4, 8).unwrap();
        let mut inserted = 0;
        let err = loop {
            match table.insert(fp(inserted, 0), ()) {
                Ok(_) => inserted += 1,
                Err(err) => break err,
            }
        };
        assert_eq!(err, MatchError::CapacityExceeded { capacity: 8 });
        assert_eq!(table.len(), 6);
        // Existing keys stay reachable and duplicates remain no-ops.
        assert!(table.contains(&fp(0, 0)));
        assert!(!table.insert(fp(0, 0), ()).unwrap());
    }

    #[test]
    fn get_or_insert_with_reports_novelty() {
        let mut table = FingerprintTable::with_capacity(4, 64).unwrap();
        let (value, fresh) = table.get_or_insert_with(fp(1, 1), || 10).unwrap();
        assert!(fresh);
        *value += 1;
        let (value, fresh) = table.get_or_insert_with(fp(1, 1), || 0).unwrap();
        assert!(!fresh);
        assert_eq!(*value, 11);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(FingerprintTable::<()>::with_capacity(0, 8).is_err());
    }
}
