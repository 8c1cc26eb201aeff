//! Where a document's text comes from.
//!
//! The matching core only sees token sequences; this module turns a
//! [`DocumentSource`] into text before any analysis starts. Files and byte
//! payloads are decoded lossily, so invalid UTF-8 becomes a replacement
//! character that the normalizer then treats as a separator.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::PipelineError;

/// A document supplied to [`compare_documents`](crate::compare_documents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Text typed or pasted by the caller.
    Text(String),
    /// Raw bytes, usually file contents read elsewhere.
    Bytes(Vec<u8>),
    /// A file read in full when the comparison starts.
    File(PathBuf),
}

impl DocumentSource {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Short label used in reports and errors.
    pub fn name(&self) -> String {
        match self {
            Self::Text(_) => "text".to_string(),
            Self::Bytes(_) => "bytes".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Resolve the source to text.
    ///
    /// Fails with [`PipelineError::InputUnavailable`] when a file is missing
    /// or unreadable.
    pub fn load(&self) -> Result<Cow<'_, str>, PipelineError> {
        match self {
            Self::Text(text) => Ok(Cow::Borrowed(text.as_str())),
            Self::Bytes(bytes) => Ok(String::from_utf8_lossy(bytes)),
            Self::File(path) => {
                let bytes = fs::read(path).map_err(|err| PipelineError::InputUnavailable {
                    source_name: path.display().to_string(),
                    reason: err.to_string(),
                })?;
                Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }
}

impl From<&str> for DocumentSource {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DocumentSource {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn text_is_borrowed() {
        let source = DocumentSource::text("hello world");
        assert!(matches!(source.load().unwrap(), Cow::Borrowed("hello world")));
        assert_eq!(source.name(), "text");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let source = DocumentSource::Bytes(vec![b'a', 0xFF, b'b']);
        assert_eq!(source.load().unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn file_contents_are_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"from a file").unwrap();

        let source = DocumentSource::file(file.path());
        assert_eq!(source.load().unwrap(), "from a file");
        assert_eq!(source.name(), file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = DocumentSource::file(&path).load().unwrap_err();
        match err {
            PipelineError::InputUnavailable { source_name, reason } => {
                assert!(source_name.ends_with("absent.txt"));
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
