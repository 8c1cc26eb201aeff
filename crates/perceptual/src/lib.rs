//! # TextGuard fingerprinting
//!
//! Takes a normalized token stream and produces the fingerprints the
//! matcher compares.
//!
//! ## Contract
//!
//! - Consumes tokens produced by the `canonical` crate; never normalizes.
//! - Pure function of `(tokens, config)`: no I/O, no clocks, no globals.
//!
//! ## Pipeline
//!
//! 1.  **Double hashing**: every window of `n` consecutive tokens is hashed
//!     by two polynomial hashes with distinct moduli over the window text
//!     joined by single spaces. Identical windows always agree; distinct
//!     windows collide only when both components collide.
//!
//! 2.  **Winnowing**: for each run of `w` consecutive window fingerprints the
//!     one with the smallest `h1` is selected (leftmost on ties). Any shared
//!     run of at least `n + w - 1` tokens is guaranteed to share a selection.
//!
//! ## Example
//!
//! ```
//! use perceptual::{signature, PerceptualConfig};
//!
//! let tokens = ["the", "quick", "brown", "fox", "jumps"];
//! let cfg = PerceptualConfig::new().with_n(3).with_w(1);
//!
//! let sig = signature(&tokens, &cfg).unwrap();
//! assert_eq!(sig.fingerprints.len(), 3);
//! assert_eq!(sig.winnowed.len(), 3);
//! ```
pub mod config;
pub mod fingerprint;
mod hashing;
mod winnow;

pub use crate::config::{PerceptualConfig, PerceptualError};
pub use crate::fingerprint::{Fingerprint, Signature, SignatureMeta, WinnowedFingerprint};
pub use crate::hashing::{fingerprint, fingerprint_sequence, DoubleHasher};
pub use crate::winnow::winnow;

/// Current signature algorithm version for this crate.
pub const SIGNATURE_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const SIGNATURE_ALGORITHM: &str = "doublepoly+winnow_v1";

/// Fingerprint every window and winnow the result.
///
/// Documents shorter than `n` tokens yield no fingerprints, and sequences
/// shorter than `w` yield no selections; neither is an error here.
pub fn signature<S>(tokens: &[S], cfg: &PerceptualConfig) -> Result<Signature, PerceptualError>
where
    S: AsRef<str> + Sync,
{
    let fingerprints = fingerprint_sequence(tokens, cfg)?;
    let winnowed = winnow(&fingerprints, cfg.w);

    Ok(Signature {
        fingerprints,
        winnowed,
        meta: SignatureMeta {
            signature_version: SIGNATURE_VERSION,
            algorithm_name: SIGNATURE_ALGORITHM.to_string(),
            n: cfg.n,
            w: cfg.w,
            base: cfg.base,
            mod1: cfg.mod1,
            mod2: cfg.mod2,
            token_count: tokens.len(),
            config_version: cfg.version,
        },
    })
}

/// Build a signature straight from a canonical document.
#[cfg(feature = "with_canonical")]
pub fn signature_for_document(
    doc: &canonical::CanonicalizedDocument,
    cfg: &PerceptualConfig,
) -> Result<Signature, PerceptualError> {
    signature(doc.tokens.as_slice(), cfg)
}
