//! Winnowing: one selected fingerprint per window of `w` consecutive
//! fingerprints.
//!
//! Selection is the smallest `h1` in the window; among equal `h1` values the
//! earliest position wins. Consecutive windows that select the same position
//! each emit it, so the output has exactly `len - w + 1` entries.

use std::collections::VecDeque;

use crate::fingerprint::{Fingerprint, WinnowedFingerprint};

/// Winnowing via monotonic deque, O(n).
///
/// Returns nothing when fewer than `w` fingerprints are supplied. A `w` of
/// zero is treated as one.
pub fn winnow(fingerprints: &[Fingerprint], w: usize) -> Vec<WinnowedFingerprint> {
    let window = w.max(1);
    let n = fingerprints.len();
    if n < window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n - window + 1);
    // Indices in the current window with strictly increasing h1 from front to
    // back; equal values keep the earlier index so the front is the leftmost
    // minimum.
    let mut dq: VecDeque<usize> = VecDeque::with_capacity(window);

    for (i, fp) in fingerprints.iter().enumerate() {
        while let Some(&j) = dq.back() {
            if fingerprints[j].h1 > fp.h1 {
                dq.pop_back();
            } else {
                break;
            }
        }
        dq.push_back(i);

        if i + 1 < window {
            continue;
        }
        let left = i + 1 - window;
        while let Some(&j) = dq.front() {
            if j < left {
                dq.pop_front();
            } else {
                break;
            }
        }
        if let Some(&idx) = dq.front() {
            out.push(WinnowedFingerprint {
                fingerprint: fingerprints[idx],
                start_idx: idx,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(h1s: &[u64]) -> Vec<Fingerprint> {
        h1s.iter()
            .enumerate()
            .map(|(i, &h1)| Fingerprint::new(h1, i as u64))
            .collect()
    }

    /// Direct scan of every window with a strict `<` comparison.
    fn winnow_naive(fps: &[Fingerprint], w: usize) -> Vec<WinnowedFingerprint> {
        if fps.len() < w {
            return Vec::new();
        }
        (0..=fps.len() - w)
            .map(|i| {
                let mut best = i;
                for j in i + 1..i + w {
                    if fps[j].h1 < fps[best].h1 {
                        best = j;
                    }
                }
                WinnowedFingerprint {
                    fingerprint: fps[best],
                    start_idx: best,
                }
            })
            .collect()
    }

    #[test]
    fn output_length_is_exact() {
        let fps = seq(&[9, 4, 7, 1, 8, 3, 3, 6]);
        for w in 1..=fps.len() {
            assert_eq!(winnow(&fps, w).len(), fps.len() - w + 1, "w={w}");
        }
    }

    #[test]
    fn short_sequence_yields_nothing() {
        let fps = seq(&[5, 2]);
        assert!(winnow(&fps, 3).is_empty());
        assert!(winnow(&[], 1).is_empty());
    }

    #[test]
    fn selects_window_minimum() {
        let fps = seq(&[100, 50, 200, 75, 25]);
        let picks: Vec<usize> = winnow(&fps, 2).iter().map(|s| s.start_idx).collect();
        assert_eq!(picks, vec![1, 1, 3, 4]);
    }

    #[test]
    fn ties_resolve_to_leftmost() {
        let fps = seq(&[100, 50, 50, 75]);
        let picks: Vec<usize> = winnow(&fps, 3).iter().map(|s| s.start_idx).collect();
        assert_eq!(picks, vec![1, 1]);

        let flat = seq(&[7, 7, 7, 7, 7]);
        let picks: Vec<usize> = winnow(&flat, 2).iter().map(|s| s.start_idx).collect();
        assert_eq!(picks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn window_of_one_selects_everything() {
        let fps = seq(&[3, 1, 2]);
        let out = winnow(&fps, 1);
        assert_eq!(out.len(), 3);
        for (i, s) in out.iter().enumerate() {
            assert_eq!(s.start_idx, i);
            assert_eq!(s.fingerprint, fps[i]);
        }
        assert_eq!(winnow(&fps, 0), out);
    }

    #[test]
    fn matches_naive_scan() {
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        let h1s: Vec<u64> = (0..300)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                state % 40
            })
            .collect();
        let fps = seq(&h1s);
        for w in [1, 2, 3, 4, 7, 16, 300] {
            assert_eq!(winnow(&fps, w), winnow_naive(&fps, w), "w={w}");
        }
    }

    #[test]
    fn selection_carries_full_fingerprint() {
        let fps = vec![Fingerprint::new(5, 99), Fingerprint::new(5, 11)];
        let out = winnow(&fps, 2);
        assert_eq!(out[0].fingerprint, Fingerprint::new(5, 99));
    }
}
