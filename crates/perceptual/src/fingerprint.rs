//! Fingerprint and signature types.
//!
//! The signature schema is part of the public contract: any incompatible
//! change must bump [`crate::SIGNATURE_VERSION`].

use serde::{Deserialize, Serialize};

/// Double hash of one n-token window.
///
/// Two windows are considered identical exactly when both components agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    /// First polynomial hash; winnowing selects on this component.
    pub h1: u64,
    /// Second polynomial hash under an independent modulus.
    pub h2: u64,
}

impl Fingerprint {
    pub const fn new(h1: u64, h2: u64) -> Self {
        Self { h1, h2 }
    }
}

/// Fingerprint selected by winnowing, with its originating position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowedFingerprint {
    pub fingerprint: Fingerprint,
    /// Index of the first token of the selected window.
    pub start_idx: usize,
}

/// Full fingerprint output for one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signature {
    /// One fingerprint per valid window, in document order.
    pub fingerprints: Vec<Fingerprint>,
    /// One selection per window of `w` consecutive fingerprints. May repeat.
    pub winnowed: Vec<WinnowedFingerprint>,
    pub meta: SignatureMeta,
}

impl Signature {
    /// Iterate over the selected fingerprints, duplicates included.
    pub fn selected(&self) -> impl Iterator<Item = Fingerprint> + '_ {
        self.winnowed.iter().map(|w| w.fingerprint)
    }
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignatureMeta {
    pub signature_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    pub n: usize,
    pub w: usize,
    pub base: u64,
    pub mod1: u64,
    pub mod2: u64,
    /// Token count of the source document.
    pub token_count: usize,
    pub config_version: u32,
}
