use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::CanonicalizeConfig;
use crate::document::CanonicalizedDocument;
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::token::Token;

/// Main entry point. Takes raw text and config and returns the normalized
/// document.
///
/// Alphanumeric characters are lowercased and kept; every run of other
/// characters collapses into a single token separator. Empty input is valid
/// and produces a document with zero tokens.
pub fn canonicalize(
    doc_id: impl Into<String>,
    input: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedDocument, CanonicalError> {
    cfg.validate()?;

    // A document ID is required for traceability.
    let doc_id: String = doc_id.into();
    let trimmed = doc_id.trim();
    if trimmed.is_empty() {
        return Err(CanonicalError::MissingDocId);
    }
    let doc_id = if doc_id.len() == trimmed.len() {
        doc_id
    } else {
        trimmed.to_string()
    };

    let normalized_text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut canonical_text = String::with_capacity(normalized_text.len());
    let mut tokens: Vec<Token> = Vec::with_capacity((normalized_text.len() / 5).saturating_add(1));
    let mut pending_space = false;
    let mut current_token_start: Option<usize> = None;

    for ch in normalized_text.chars() {
        if ch.is_alphanumeric() {
            // Lowercasing can expand into several chars (e.g. 'İ' -> "i\u{307}");
            // only the alphanumeric ones survive so the output stays a fixed point.
            for lower in ch.to_lowercase().filter(|c| c.is_alphanumeric()) {
                append_char(
                    lower,
                    &mut canonical_text,
                    &mut current_token_start,
                    &mut pending_space,
                );
            }
        } else {
            finalize_token(&mut tokens, &canonical_text, &mut current_token_start);
            if !canonical_text.is_empty() {
                pending_space = true;
            }
        }
    }
    finalize_token(&mut tokens, &canonical_text, &mut current_token_start);

    if let Some(limit) = cfg.max_tokens {
        if tokens.len() > limit {
            return Err(CanonicalError::TokenLimitExceeded {
                limit,
                found: tokens.len(),
            });
        }
    }

    let canonical_version = cfg.version;
    let sha256_hex = hash_canonical_bytes(canonical_version, canonical_text.as_bytes());

    Ok(CanonicalizedDocument {
        doc_id,
        canonical_text,
        tokens,
        sha256_hex,
        canonical_version,
    })
}

/// Normalize text with the default configuration and return the token texts.
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("Hello, World!"), vec!["hello", "world"]);
/// ```
pub fn normalize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn append_char(
    ch: char,
    canonical_text: &mut String,
    current_token_start: &mut Option<usize>,
    pending_space: &mut bool,
) {
    if *pending_space {
        canonical_text.push(' ');
        *pending_space = false;
        *current_token_start = Some(canonical_text.len());
    } else if current_token_start.is_none() {
        *current_token_start = Some(canonical_text.len());
    }
    canonical_text.push(ch);
}

fn finalize_token(
    tokens: &mut Vec<Token>,
    canonical_text: &str,
    current_token_start: &mut Option<usize>,
) {
    if let Some(start) = current_token_start.take() {
        if start < canonical_text.len() {
            let end = canonical_text.len();
            tokens.push(Token {
                text: canonical_text[start..end].to_string(),
                start,
                end,
            });
        }
    }
}
