//! Output of the normalizer.

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A normalized document: ordered lowercase alphanumeric tokens.
///
/// `canonical_text` is the token texts joined by single spaces, so
/// re-normalizing it yields the same tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizedDocument {
    /// Caller-supplied identifier, trimmed.
    pub doc_id: String,
    /// Tokens joined by single spaces.
    pub canonical_text: String,
    /// Tokens with byte offsets into `canonical_text`.
    pub tokens: Vec<Token>,
    /// Hex SHA-256 identity digest (see [`crate::hash_canonical_bytes`]).
    pub sha256_hex: String,
    /// Config version used to produce this document.
    pub canonical_version: u32,
}

impl CanonicalizedDocument {
    /// Number of tokens in the document.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Borrow token texts in order.
    pub fn token_texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
