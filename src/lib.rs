//! Docslice - limited plain text extraction from ODT and DOCX documents
//!
//! This library reads the text of OpenDocument Text (.odt) and Office Open XML
//! (.docx) files up to a caller-chosen budget, without building a document tree
//! and without decompressing more of the package than it needs.
//!
//! # Features
//!
//! - **Streaming**: the content part is tokenized incrementally and reading
//!   stops as soon as the budget is spent
//! - **Exact limits**: the budget counts characters (or bytes) of the normalized
//!   text and a cut never splits a character
//! - **Normalized output**: words separated by single spaces, no leading or
//!   trailing whitespace
//! - **Distinct outcomes**: [`Status::Complete`] when the whole text fit,
//!   [`Status::Truncated`] when more text follows, and separate errors for a bad
//!   archive, a missing content part and broken XML
//!
//! # Example - Reading a DOCX file
//!
//! ```no_run
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("document.docx")?;
//! let size = file.metadata()?.len();
//!
//! let extract = docslice::read_limited_docx(&file, size, 100)?;
//! if extract.is_truncated() {
//!     println!("First 100 characters: {}", extract.text);
//! } else {
//!     println!("Whole document: {}", extract.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Choosing the format at runtime
//!
//! ```no_run
//! use docslice::{DocumentFormat, ExtractOptions, LimitUnit};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = "notes.odt";
//! let format = DocumentFormat::from_extension(path).ok_or("unsupported file")?;
//! let options = ExtractOptions::new().with_limit(4096).with_unit(LimitUnit::Bytes);
//!
//! let extract = docslice::read_limited_file(path, format, &options)?;
//! println!("{} ({:?})", extract.text, extract.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Salvaging text from a damaged document
//!
//! ```no_run
//! use std::fs::File;
//! use docslice::Error;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("damaged.odt")?;
//! let size = file.metadata()?.len();
//!
//! match docslice::read_limited_odt(&file, size, 500) {
//!     Ok(extract) => println!("{}", extract.text),
//!     Err(Error::MalformedXml { detail, partial }) => {
//!         eprintln!("broken XML ({}), recovered: {}", detail, partial);
//!     },
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

/// Shared building blocks: errors, character slicing, normalization and the
/// streaming XML helpers.
pub mod common;

/// ZIP package access
pub mod container;

/// Supported formats and their text-bearing elements
pub mod format;

mod options;
mod reader;

pub use common::{Error, Result};
pub use container::{Container, SizedSource};
pub use format::DocumentFormat;
pub use options::{ExtractOptions, LimitUnit};
pub use reader::{Extract, Status, read_content_limited};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Extract at most `options.limit` units of normalized text from a document.
///
/// `document` is any random-access source (a `File`, `&File`, `Cursor<Vec<u8>>`…)
/// and `total_size` its length in bytes. Both the package handle and the entry
/// stream are released before this returns, whatever the outcome.
///
/// # Errors
///
/// - [`Error::InvalidContainer`] if `document` is not a readable ZIP package
/// - [`Error::ContentNotFound`] if the package lacks `format`'s content part,
///   usually because the other format was assumed
/// - [`Error::MalformedXml`] if the content part breaks before the budget is
///   full; the error carries the text recovered before the failure
pub fn read_limited<R: Read + Seek>(
    document: R,
    total_size: u64,
    format: DocumentFormat,
    options: &ExtractOptions,
) -> Result<Extract> {
    let mut container = Container::open(document, total_size)?;
    let entry = container.entry(format.content_path())?;
    read_content_limited(BufReader::new(entry), format, options)
}

/// Extract at most `limit` characters of text from an ODT document.
pub fn read_limited_odt<R: Read + Seek>(document: R, total_size: u64, limit: usize) -> Result<Extract> {
    read_limited(document, total_size, DocumentFormat::Odt, &ExtractOptions::chars(limit))
}

/// Extract at most `limit` characters of text from a DOCX document.
pub fn read_limited_docx<R: Read + Seek>(document: R, total_size: u64, limit: usize) -> Result<Extract> {
    read_limited(document, total_size, DocumentFormat::Docx, &ExtractOptions::chars(limit))
}

/// Open a document from a file path and extract from it.
///
/// The size is taken from the file's metadata.
pub fn read_limited_file<P: AsRef<Path>>(
    path: P,
    format: DocumentFormat,
    options: &ExtractOptions,
) -> Result<Extract> {
    let file = File::open(path.as_ref())?;
    let size = file.metadata()?.len();
    read_limited(file, size, format, options)
}
