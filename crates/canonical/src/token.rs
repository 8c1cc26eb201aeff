use serde::{Deserialize, Serialize};

/// A token with its UTF-8 byte offsets in the canonical text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Lowercase alphanumeric token text.
    pub text: String,
    /// Byte offset (inclusive) in the canonical text.
    pub start: usize,
    /// Byte offset (exclusive) in the canonical text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_derefs_to_its_text() {
        let token = Token {
            text: "fox".into(),
            start: 10,
            end: 13,
        };
        let as_str: &str = token.as_ref();
        assert_eq!(as_str, "fox");
        assert_eq!(token.end - token.start, as_str.len());
    }
}
