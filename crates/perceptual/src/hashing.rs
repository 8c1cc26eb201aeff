//! Double polynomial hashing of n-token windows.
//!
//! Each window is hashed as if its tokens were joined by single spaces:
//! the bytes of every token are folded in order, with one space step
//! between tokens and none after the last. Two independent moduli give the
//! `(h1, h2)` pair.

use rayon::prelude::*;

use crate::config::{PerceptualConfig, PerceptualError};
use crate::fingerprint::Fingerprint;

const SEPARATOR: u8 = b' ';

/// Hashing parameters lifted out of a validated [`PerceptualConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHasher {
    base: u64,
    mod1: u64,
    mod2: u64,
}

impl DoubleHasher {
    pub fn new(base: u64, mod1: u64, mod2: u64) -> Self {
        Self { base, mod1, mod2 }
    }

    pub fn from_config(cfg: &PerceptualConfig) -> Self {
        Self::new(cfg.base, cfg.mod1, cfg.mod2)
    }

    #[inline]
    fn step(&self, (h1, h2): (u64, u64), byte: u8) -> (u64, u64) {
        (
            mul_add_mod(h1, self.base, byte, self.mod1),
            mul_add_mod(h2, self.base, byte, self.mod2),
        )
    }

    /// Hash raw phrase text byte by byte.
    pub fn hash_bytes(&self, bytes: &[u8]) -> Fingerprint {
        let (h1, h2) = bytes.iter().fold((0, 0), |acc, &b| self.step(acc, b));
        Fingerprint::new(h1, h2)
    }

    /// Fingerprint the `n` tokens starting at `start`.
    ///
    /// Returns [`PerceptualError::WindowOutOfBounds`] unless
    /// `start + n <= tokens.len()`.
    pub fn window<S: AsRef<str>>(
        &self,
        tokens: &[S],
        start: usize,
        n: usize,
    ) -> Result<Fingerprint, PerceptualError> {
        let end = start
            .checked_add(n)
            .filter(|&end| n > 0 && end <= tokens.len())
            .ok_or(PerceptualError::WindowOutOfBounds {
                start,
                n,
                len: tokens.len(),
            })?;
        Ok(self.window_unchecked(&tokens[start..end]))
    }

    fn window_unchecked<S: AsRef<str>>(&self, window: &[S]) -> Fingerprint {
        let mut acc = (0u64, 0u64);
        for (i, token) in window.iter().enumerate() {
            if i > 0 {
                acc = self.step(acc, SEPARATOR);
            }
            for &byte in token.as_ref().as_bytes() {
                acc = self.step(acc, byte);
            }
        }
        Fingerprint::new(acc.0, acc.1)
    }
}

#[inline]
fn mul_add_mod(h: u64, base: u64, byte: u8, modulus: u64) -> u64 {
    ((h as u128 * base as u128 + byte as u128) % modulus as u128) as u64
}

/// Fingerprint a single window using the hash parameters from `cfg`.
pub fn fingerprint<S: AsRef<str>>(
    tokens: &[S],
    start: usize,
    cfg: &PerceptualConfig,
) -> Result<Fingerprint, PerceptualError> {
    cfg.validate()?;
    DoubleHasher::from_config(cfg).window(tokens, start, cfg.n)
}

/// Fingerprint every valid window in document order.
///
/// Produces `max(0, len - n + 1)` fingerprints.
pub fn fingerprint_sequence<S>(
    tokens: &[S],
    cfg: &PerceptualConfig,
) -> Result<Vec<Fingerprint>, PerceptualError>
where
    S: AsRef<str> + Sync,
{
    cfg.validate()?;
    let hasher = DoubleHasher::from_config(cfg);
    let n = cfg.n;
    if tokens.len() < n {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(tokens.len() - n + 1);
    if cfg.use_parallel {
        tokens
            .par_windows(n)
            .map(|window| hasher.window_unchecked(window))
            .collect_into_vec(&mut out);
    } else {
        out.extend(tokens.windows(n).map(|window| hasher.window_unchecked(window)));
    }
    Ok(out)
}
