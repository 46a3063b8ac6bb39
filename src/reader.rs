//! Limited reading of a content part.
//!
//! The content stream is tokenized incrementally; only the text of one element
//! is held at a time, and reading stops as soon as the outcome is known.
//!
//! The output is always a prefix of the document's *normalized text*: every
//! non-empty normalized fragment, in document order, joined by single spaces.
//! Separators count toward the budget like any other character.

use crate::common::normalize::normalize;
use crate::common::runes;
use crate::common::xml::{collect_element_text, content_reader, element_has_text};
use crate::common::{Error, Result};
use crate::format::DocumentFormat;
use crate::options::{ExtractOptions, LimitUnit};
use quick_xml::events::Event;
use std::io::BufRead;
use tracing::{debug, trace};

/// How an extraction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The whole normalized text fit in the budget and is returned.
    ///
    /// This includes text exactly as long as the limit.
    Complete,
    /// More normalized text follows the returned prefix.
    Truncated,
}

/// Text returned by a limited extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    pub text: String,
    pub status: Status,
}

impl Extract {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.status == Status::Truncated
    }

    /// Consume the extract, keeping only the text.
    #[inline]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Output buffer plus the amount of budget it already uses.
///
/// `consumed` is always the size of `text` in the configured unit and never
/// exceeds `limit`.
struct Accumulator {
    text: String,
    consumed: usize,
    limit: usize,
    unit: LimitUnit,
}

impl Accumulator {
    fn new(options: &ExtractOptions) -> Self {
        // The limit can be huge for "read everything" callers; do not trust it
        // as a capacity hint beyond a few pages.
        let capacity = options.limit.min(64 * 1024);
        Self {
            text: String::with_capacity(capacity),
            consumed: 0,
            limit: options.limit,
            unit: options.unit,
        }
    }

    /// Append one normalized fragment. Returns `Some(Truncated)` once text is
    /// known to exist past the budget.
    fn push(&mut self, fragment: &str) -> Option<Status> {
        if fragment.is_empty() {
            trace!("skipping empty fragment");
            return None;
        }

        // A full buffer plus a non-empty fragment means the document goes on.
        if self.consumed >= self.limit {
            return Some(Status::Truncated);
        }

        if !self.text.is_empty() {
            self.text.push(' ');
            self.consumed += 1;
            if self.consumed == self.limit {
                return Some(Status::Truncated);
            }
        }

        let size = self.unit.measure(fragment);
        let remaining = self.limit - self.consumed;
        trace!(size, remaining, "collected fragment");

        if size > remaining {
            let cut = match self.unit {
                LimitUnit::Chars => runes::take(fragment.as_bytes(), remaining).prefix.len(),
                LimitUnit::Bytes => runes::floor_char_boundary(fragment, remaining),
            };
            let head = &fragment[..cut];
            self.text.push_str(head);
            self.consumed += self.unit.measure(head);
            return Some(Status::Truncated);
        }

        self.text.push_str(fragment);
        self.consumed += size;
        None
    }

    fn is_full(&self) -> bool {
        self.consumed >= self.limit
    }

    fn finish(self, status: Status) -> Extract {
        debug!(
            ?status,
            consumed = self.consumed,
            bytes = self.text.len(),
            "extraction finished"
        );
        Extract { text: self.text, status }
    }

    /// Turn an error hit while reading into the extraction result.
    ///
    /// Broken markup after a full budget cannot change the returned text, but
    /// it does mean the content part goes on, so it reads as `Truncated`.
    fn fail(self, err: Error) -> Result<Extract> {
        if self.is_full() && matches!(err, Error::MalformedXml { .. }) {
            debug!(error = %err, "malformed content past the budget");
            return Ok(self.finish(Status::Truncated));
        }
        debug!(error = %err, collected = self.text.len(), "extraction failed");
        Err(err.with_partial(&self.text))
    }
}

/// Extract at most `options.limit` units of normalized text from a content part.
///
/// `source` is the raw XML of the format's content part (`content.xml` or
/// `word/document.xml`).
///
/// # Errors
///
/// [`Error::MalformedXml`] if the XML is broken before the budget is full; the
/// error carries the text collected so far. Broken XML after that point yields
/// a `Truncated` extract. [`Error::InvalidContainer`] if
/// reading `source` fails.
///
/// # Examples
///
/// ```rust
/// use docslice::{read_content_limited, DocumentFormat, ExtractOptions, Status};
///
/// let xml = r#"<w:document xmlns:w="urn:w"><w:body>
///     <w:p><w:r><w:t>Hello   world</w:t></w:r></w:p>
/// </w:body></w:document>"#;
///
/// let extract = read_content_limited(xml.as_bytes(), DocumentFormat::Docx, &ExtractOptions::chars(5))?;
/// assert_eq!(extract.text, "Hello");
/// assert_eq!(extract.status, Status::Truncated);
/// # Ok::<(), docslice::Error>(())
/// ```
pub fn read_content_limited<R: BufRead>(
    source: R,
    format: DocumentFormat,
    options: &ExtractOptions,
) -> Result<Extract> {
    let mut reader = content_reader(source);
    let mut acc = Accumulator::new(options);
    let mut buf = Vec::new();
    // Open elements outside text-bearing ones, to notice an unclosed root
    let mut depth = 0usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return acc.fail(e.into()),
        };

        match event {
            Event::Start(e) => {
                let local = e.local_name();
                if !format.is_text_element(local.as_ref()) {
                    depth += 1;
                } else if acc.is_full() {
                    // Only whether more text exists is still open
                    let element = String::from_utf8_lossy(local.as_ref()).into_owned();
                    match element_has_text(&mut reader, &element) {
                        Ok(true) => return Ok(acc.finish(Status::Truncated)),
                        Ok(false) => {},
                        Err(err) => return acc.fail(err),
                    }
                } else {
                    let element = String::from_utf8_lossy(local.as_ref()).into_owned();
                    let raw = match collect_element_text(&mut reader, &element) {
                        Ok(raw) => raw,
                        Err(err) => return acc.fail(err),
                    };
                    if let Some(status) = acc.push(&normalize(&raw)) {
                        return Ok(acc.finish(status));
                    }
                }
            },
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => {
                if depth > 0 && !acc.is_full() {
                    return acc.fail(Error::malformed(format!(
                        "unexpected end of stream with {} element(s) still open",
                        depth
                    )));
                }
                return Ok(acc.finish(Status::Complete));
            },
            _ => {},
        }
        buf.clear();
    }
}
