//! Configuration and error types for fingerprinting and winnowing.
//!
//! Free of I/O and environment-dependent behavior: the fingerprint pipeline
//! is a pure function of `(tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the fingerprint engine and winnower.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter fingerprints must bump this so old
    /// signatures remain comparable only with their own kind.
    pub version: u32,
    /// Gram size: number of tokens per window.
    ///
    /// Larger values demand longer verbatim runs before a match registers.
    pub n: usize,
    /// Winnowing window size, in fingerprints.
    ///
    /// Any shared run of at least `n + w - 1` tokens is guaranteed to share
    /// a selected fingerprint.
    pub w: usize,
    /// Polynomial base shared by both rolling hashes.
    pub base: u64,
    /// Modulus of the first hash (`h1`). Winnowing orders by this component.
    pub mod1: u64,
    /// Modulus of the second hash (`h2`). Must differ from `mod1`.
    pub mod2: u64,
    /// Compute the fingerprint sequence with rayon.
    ///
    /// Output is identical to the sequential path.
    pub use_parallel: bool,
}

impl PerceptualConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gram size (n).
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the winnowing window size (w).
    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    /// Set the hash base.
    pub fn with_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Set both moduli.
    pub fn with_moduli(mut self, mod1: u64, mod2: u64) -> Self {
        self.mod1 = mod1;
        self.mod2 = mod2;
        self
    }

    /// Enable or disable parallel fingerprinting.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.n < 1 {
            return Err(PerceptualError::InvalidConfigN { n: self.n });
        }
        if self.w < 1 {
            return Err(PerceptualError::InvalidConfigW { w: self.w });
        }
        if self.base < 2 {
            return Err(PerceptualError::InvalidConfigBase { base: self.base });
        }
        for modulus in [self.mod1, self.mod2] {
            if modulus < 2 {
                return Err(PerceptualError::InvalidConfigModulus { modulus });
            }
        }
        if self.mod1 == self.mod2 {
            return Err(PerceptualError::DuplicateModuli {
                modulus: self.mod1,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            n: 3,
            w: 3,
            base: 131,
            mod1: 1_000_000_007,
            mod2: 1_000_000_009,
            use_parallel: false,
        }
    }
}

/// Errors returned by the fingerprinting pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: n must be >= 1 (got {n})")]
    InvalidConfigN { n: usize },

    #[error("invalid config: w must be >= 1 (got {w})")]
    InvalidConfigW { w: usize },

    #[error("invalid config: base must be >= 2 (got {base})")]
    InvalidConfigBase { base: u64 },

    #[error("invalid config: modulus must be >= 2 (got {modulus})")]
    InvalidConfigModulus { modulus: u64 },

    #[error("invalid config: mod1 and mod2 must differ (both {modulus})")]
    DuplicateModuli { modulus: u64 },

    #[error("window start={start} n={n} exceeds document length {len}")]
    WindowOutOfBounds { start: usize, n: usize, len: usize },
}
