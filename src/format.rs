//! Supported document formats.
//!
//! Both formats are ZIP packages with the document body in a single XML part;
//! they differ in where that part lives and in which elements carry the text.

use std::fmt;
use std::path::Path;

/// Body part of an OpenDocument text package.
pub const ODT_CONTENT_PATH: &str = "content.xml";

/// Main document part of a WordprocessingML package.
pub const DOCX_CONTENT_PATH: &str = "word/document.xml";

/// Document format to extract from.
///
/// The format is chosen by the caller; content is never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// OpenDocument Text (.odt)
    Odt,
    /// Office Open XML word processing document (.docx)
    Docx,
}

impl DocumentFormat {
    /// Path of the XML part holding the document text.
    #[inline]
    pub const fn content_path(self) -> &'static str {
        match self {
            DocumentFormat::Odt => ODT_CONTENT_PATH,
            DocumentFormat::Docx => DOCX_CONTENT_PATH,
        }
    }

    /// Whether a start element with this local name (namespace prefix already
    /// stripped) carries user-visible text.
    ///
    /// ODT text sits in paragraphs (`text:p`), headings (`text:h`) and spans
    /// (`text:span`); DOCX text sits in run text (`w:t`).
    #[inline]
    pub fn is_text_element(self, local_name: &[u8]) -> bool {
        match self {
            DocumentFormat::Odt => matches!(local_name, b"p" | b"h" | b"span"),
            DocumentFormat::Docx => local_name == b"t",
        }
    }

    /// Pick a format from a file extension (`.odt` / `.docx`, any case).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docslice::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_extension("report.DOCX"), Some(DocumentFormat::Docx));
    /// assert_eq!(DocumentFormat::from_extension("notes.odt"), Some(DocumentFormat::Odt));
    /// assert_eq!(DocumentFormat::from_extension("legacy.doc"), None);
    /// ```
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("odt") {
            Some(DocumentFormat::Odt)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Odt => write!(f, "ODT"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}
