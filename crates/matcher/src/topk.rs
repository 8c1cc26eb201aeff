//! Bounded min-heap selection of the most frequent entries.
//!
//! The first `k` entries are taken unconditionally; afterwards an entry
//! replaces the heap root only when its count is strictly greater. The
//! result is sorted explicitly before it is returned, since heap order is
//! only root-minimal.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::frequency::FrequencyEntry;

struct Candidate<'a>(&'a FrequencyEntry);

impl Candidate<'_> {
    /// Lower count ranks lower; among equal counts the later first occurrence
    /// ranks lower, so it is the one evicted first.
    fn key(&self) -> (usize, Reverse<usize>) {
        (self.0.count, Reverse(self.0.first_seen))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

pub struct TopKSelector<'a> {
    k: usize,
    heap: BinaryHeap<Reverse<Candidate<'a>>>,
}

impl<'a> TopKSelector<'a> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k),
        }
    }

    pub fn offer(&mut self, entry: &'a FrequencyEntry) {
        if self.k == 0 {
            return;
        }
        if self.heap.len() < self.k {
            self.heap.push(Reverse(Candidate(entry)));
            return;
        }
        if let Some(mut root) = self.heap.peek_mut() {
            if entry.count > root.0 .0.count {
                // Dropping the PeekMut restores heap order.
                *root = Reverse(Candidate(entry));
            }
        }
    }

    /// Smallest count currently kept.
    pub fn threshold(&self) -> Option<usize> {
        self.heap.peek().map(|root| root.0 .0.count)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Kept entries, highest count first; ties by earliest first occurrence.
    pub fn into_sorted(self) -> Vec<&'a FrequencyEntry> {
        let mut kept: Vec<&'a FrequencyEntry> =
            self.heap.into_iter().map(|Reverse(Candidate(e))| e).collect();
        kept.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        kept
    }
}

/// Select the `k` most frequent entries from `entries`.
pub fn top_k<'a, I>(entries: I, k: usize) -> Vec<&'a FrequencyEntry>
where
    I: IntoIterator<Item = &'a FrequencyEntry>,
{
    let mut selector = TopKSelector::new(k);
    for entry in entries {
        selector.offer(entry);
    }
    selector.into_sorted()
}
