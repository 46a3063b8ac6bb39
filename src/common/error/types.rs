//! Error taxonomy for limited text extraction.
use thiserror::Error;

/// Main error type for docslice operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while opening the document itself
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a readable ZIP archive, or the content entry is corrupt
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// The archive is fine but has no entry at the expected content path
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    /// The content entry is not well-formed XML.
    ///
    /// `partial` carries the normalized text collected before the failure.
    #[error("Malformed XML: {detail}")]
    MalformedXml { detail: String, partial: String },
}

impl Error {
    /// Build a `MalformedXml` error with no partial output attached yet.
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Error::MalformedXml {
            detail: detail.into(),
            partial: String::new(),
        }
    }

    /// Attach the text accumulated so far to a `MalformedXml` error.
    ///
    /// Other variants are returned untouched: container failures carry no
    /// meaningful partial output.
    pub(crate) fn with_partial(self, text: &str) -> Self {
        match self {
            Error::MalformedXml { detail, .. } => Error::MalformedXml {
                detail,
                partial: text.to_owned(),
            },
            other => other,
        }
    }

    /// Best-effort text recovered before a `MalformedXml` failure.
    pub fn partial_text(&self) -> Option<&str> {
        match self {
            Error::MalformedXml { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// Whether the failure is about the archive rather than its XML.
    pub fn is_container_error(&self) -> bool {
        matches!(self, Error::InvalidContainer(_) | Error::ContentNotFound(_))
    }
}

/// Result type for docslice operations.
pub type Result<T> = std::result::Result<T, Error>;
