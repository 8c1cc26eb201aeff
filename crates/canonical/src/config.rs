//! Configuration types for the normalizer.
//!
//! [`CanonicalizeConfig`] controls how raw text becomes a token stream. The
//! `version` field participates in the document digest, so any change that
//! can alter the token stream must bump it.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.normalize_unicode);
//! assert_eq!(config.max_tokens, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    ///
    /// The version is folded into the document digest:
    /// ```text
    /// SHA-256(version.to_be_bytes() || 0x00 || canonical_text)
    /// ```
    pub version: u32,

    /// Apply Unicode NFKC normalization before filtering characters.
    ///
    /// With this enabled, compatibility forms such as full-width digits or
    /// ligatures fold into their plain alphanumeric equivalents before the
    /// alphanumeric test runs.
    ///
    /// # Default
    ///
    /// `false`: characters are classified exactly as supplied.
    #[serde(default)]
    pub normalize_unicode: bool,

    /// Upper bound on the number of tokens a single document may produce.
    ///
    /// `None` (the default) means unbounded. When a limit is set and the
    /// document exceeds it, canonicalization fails with
    /// [`CanonicalError::TokenLimitExceeded`]; the token stream is never
    /// truncated.
    #[serde(default)]
    pub max_tokens: Option<usize>,
}

impl CanonicalizeConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFKC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Set an explicit token limit.
    pub fn with_max_tokens(mut self, limit: usize) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(CanonicalError::InvalidConfig(
                "max_tokens must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            max_tokens: None,
        }
    }
}
