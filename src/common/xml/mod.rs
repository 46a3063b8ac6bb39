//! Streaming XML helpers shared by both document formats.

pub mod collector;

pub use collector::{collect_element_text, element_has_text};

use quick_xml::Reader;
use std::io::BufRead;

/// Build the pull tokenizer used for content parts.
///
/// Self-closing tags are expanded into a start/end pair so `<text:p/>` goes
/// through the same path as an empty `<text:p></text:p>`. End tag names are
/// checked against their start tags.
pub fn content_reader<R: BufRead>(source: R) -> Reader<R> {
    let mut reader = Reader::from_reader(source);
    let config = reader.config_mut();
    config.expand_empty_elements = true;
    config.check_end_names = true;
    reader
}
