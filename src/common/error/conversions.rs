//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert errors raised by
//! the ZIP and XML layers into the unified Error type.

use super::types::Error;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::InvalidContainer(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            // The tokenizer only sees I/O errors from the decompressing entry
            // reader, so they describe the container, not the XML.
            quick_xml::Error::Io(e) => Error::InvalidContainer(format!("failed to read content entry: {}", e)),
            other => Error::malformed(other.to_string()),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::malformed(format!("invalid UTF-8 in character data: {}", err))
    }
}
