//! TextGuard canonical text layer.
//!
//! Turns raw document text into an ordered stream of lowercase alphanumeric
//! tokens. Everything downstream (fingerprinting, winnowing, matching) reads
//! only this token stream.
//!
//! ## Rules
//!
//! - Alphanumeric characters are lowercased and kept.
//! - Any run of non-alphanumeric characters becomes one separator.
//! - Leading and trailing separators never produce empty tokens.
//! - Empty input is valid and yields zero tokens.
//! - Documents are unbounded unless [`CanonicalizeConfig::max_tokens`] is set,
//!   in which case overflow is an error rather than a silent cut.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Normalizing the canonical
//! text of a document again yields the same tokens.
//!
//! ```rust
//! use canonical::{canonicalize, CanonicalizeConfig};
//!
//! let doc = canonicalize("ref", "The QUICK brown-fox!", &CanonicalizeConfig::default()).unwrap();
//! assert_eq!(doc.canonical_text, "the quick brown fox");
//! assert_eq!(doc.tokens.len(), 4);
//! ```

mod config;
mod document;
mod error;
mod hash;
mod pipeline;
mod token;

pub use crate::config::CanonicalizeConfig;
pub use crate::document::CanonicalizedDocument;
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::pipeline::{canonicalize, normalize};
pub use crate::token::Token;
