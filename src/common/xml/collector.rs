//! Collection of all character data nested inside one element.
//!
//! Text-bearing elements routinely wrap their words in further markup
//! (`<text:p>Hello <text:span>world</text:span></text:p>`), so the collector keeps
//! reading until the start element is closed and gathers the text of every
//! descendant in document order.

use crate::common::normalize::is_space;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use std::io::BufRead;
use tracing::debug;

/// Read the remainder of an element whose start tag was just consumed.
///
/// `element` is the local name of that start tag; it is only used in error
/// messages. Every contiguous run of character data is followed by one space so
/// that words split by markup stay apart. Resolved references join the run they
/// appear in; CDATA sections form a run of their own.
///
/// Descendants append to the same buffer in document order, so a depth counter
/// is the whole work stack: nesting depth costs no call frames. The tokenizer
/// guarantees that end tags match their start tags.
///
/// # Errors
///
/// Returns [`Error::MalformedXml`] when the stream ends before the element is
/// closed, on a syntax error, on an unknown entity or on invalid UTF-8.
pub fn collect_element_text<R: BufRead>(reader: &mut Reader<R>, element: &str) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();
    let mut depth = 1usize;
    let mut in_run = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                text.push_str(std::str::from_utf8(e.as_ref())?);
                in_run = true;
            },
            Event::GeneralRef(e) => {
                push_reference(&mut text, &e, element)?;
                in_run = true;
            },
            Event::CData(e) => {
                close_run(&mut text, &mut in_run);
                text.push_str(std::str::from_utf8(e.as_ref())?);
                text.push(' ');
            },
            Event::Start(_) => {
                close_run(&mut text, &mut in_run);
                depth += 1;
            },
            Event::End(_) => {
                close_run(&mut text, &mut in_run);
                depth -= 1;
                if depth == 0 {
                    return Ok(text);
                }
            },
            Event::Eof => {
                debug!(element, depth, collected = text.len(), "stream ended inside text element");
                return Err(Error::malformed(format!(
                    "unexpected end of stream inside <{}>",
                    element
                )));
            },
            // Comments, processing instructions and self-closing tags (if the
            // reader was not told to expand them) still separate words.
            _ => close_run(&mut text, &mut in_run),
        }
        buf.clear();
    }
}

/// Read the remainder of an element only far enough to learn whether it holds
/// any non-whitespace text.
///
/// Returns `true` at the first such character without buffering the rest of
/// the element, `false` once the element closes. Errors as in
/// [`collect_element_text`].
pub fn element_has_text<R: BufRead>(reader: &mut Reader<R>, element: &str) -> Result<bool> {
    let mut buf = Vec::new();
    let mut scratch = String::new();
    let mut depth = 1usize;

    loop {
        let found = match reader.read_event_into(&mut buf)? {
            Event::Text(e) => has_word(std::str::from_utf8(e.as_ref())?),
            Event::CData(e) => has_word(std::str::from_utf8(e.as_ref())?),
            Event::GeneralRef(e) => {
                scratch.clear();
                push_reference(&mut scratch, &e, element)?;
                has_word(&scratch)
            },
            Event::Start(_) => {
                depth += 1;
                false
            },
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(false);
                }
                false
            },
            Event::Eof => {
                return Err(Error::malformed(format!(
                    "unexpected end of stream inside <{}>",
                    element
                )));
            },
            _ => false,
        };
        if found {
            return Ok(true);
        }
        buf.clear();
    }
}

/// Append the text a `&...;` reference stands for.
///
/// Only numeric character references and the five predefined entities exist
/// without a DTD; anything else is malformed.
fn push_reference(text: &mut String, reference: &BytesRef<'_>, element: &str) -> Result<()> {
    if let Some(c) = reference.resolve_char_ref()? {
        text.push(c);
        return Ok(());
    }
    let name = std::str::from_utf8(reference)?;
    let resolved = resolve_predefined_entity(name).ok_or_else(|| {
        Error::malformed(format!("unknown entity &{}; inside <{}>", name, element))
    })?;
    text.push_str(resolved);
    Ok(())
}

#[inline]
fn has_word(text: &str) -> bool {
    text.chars().any(|c| !is_space(c))
}

#[inline]
fn close_run(text: &mut String, in_run: &mut bool) {
    if *in_run {
        text.push(' ');
        *in_run = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::content_reader;

    /// Position a reader right after the first start tag named `element` and
    /// collect from there.
    fn collect(xml: &str, element: &[u8]) -> Result<String> {
        let mut reader = content_reader(xml.as_bytes());
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == element => break,
                Event::Eof => panic!("start element not found"),
                _ => {},
            }
            buf.clear();
        }
        let name = String::from_utf8_lossy(element).into_owned();
        collect_element_text(&mut reader, &name)
    }

    fn has_text(xml: &str, element: &[u8]) -> Result<bool> {
        let mut reader = content_reader(xml.as_bytes());
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == element => break,
                Event::Eof => panic!("start element not found"),
                _ => {},
            }
            buf.clear();
        }
        let name = String::from_utf8_lossy(element).into_owned();
        element_has_text(&mut reader, &name)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(collect("<p>Hello   world</p>", b"p").unwrap(), "Hello   world ");
    }

    #[test]
    fn test_nested_elements() {
        let xml = r#"<text:p xmlns:text="urn:t">Hello<text:span>big</text:span>world</text:p>"#;
        assert_eq!(collect(xml, b"p").unwrap(), "Hello big world ");
    }

    #[test]
    fn test_same_name_nested() {
        let xml = "<span>a<span>b<span>c</span></span>d</span><span>tail</span>";
        assert_eq!(collect(xml, b"span").unwrap(), "a b c d ");
    }

    #[test]
    fn test_entities_join_their_run() {
        let xml = "<t>Fish&amp;Chips &#x41;&#66;C</t>";
        assert_eq!(collect(xml, b"t").unwrap(), "Fish&Chips ABC ");
    }

    #[test]
    fn test_cdata_is_own_run() {
        let xml = "<t>before<![CDATA[<raw>]]>after</t>";
        assert_eq!(collect(xml, b"t").unwrap(), "before <raw> after ");
    }

    #[test]
    fn test_comment_separates_words() {
        let xml = "<t>one<!-- note -->two</t>";
        assert_eq!(collect(xml, b"t").unwrap(), "one two ");
    }

    #[test]
    fn test_empty_children() {
        let xml = "<p>a<br/>b<x></x></p>";
        assert_eq!(collect(xml, b"p").unwrap(), "a b ");
        assert_eq!(collect("<p/>", b"p").unwrap(), "");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = collect("<root><p>never closed<span>x</span>", b"p").unwrap_err();
        match err {
            Error::MalformedXml { detail, .. } => assert!(detail.contains("<p>"), "{}", detail),
            other => panic!("expected MalformedXml, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = collect("<p>text<span>x</p></span>", b"p").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { .. }), "{:?}", err);
    }

    #[test]
    fn test_unknown_entity() {
        let err = collect("<t>a&nbsp;b</t>", b"t").unwrap_err();
        match err {
            Error::MalformedXml { detail, .. } => assert!(detail.contains("&nbsp;")),
            other => panic!("expected MalformedXml, got {:?}", other),
        }
    }

    #[test]
    fn test_signed_char_refs_rejected() {
        for xml in ["<t>&#+65;</t>", "<t>&#x+42;</t>", "<t>&#-65;</t>"] {
            let err = collect(xml, b"t").unwrap_err();
            assert!(matches!(err, Error::MalformedXml { .. }), "{}: {:?}", xml, err);
        }
    }

    #[test]
    fn test_invalid_char_refs_rejected() {
        for xml in ["<t>&#0;</t>", "<t>&#xD800;</t>", "<t>&#x110000;</t>", "<t>&#xZZ;</t>"] {
            let err = collect(xml, b"t").unwrap_err();
            assert!(matches!(err, Error::MalformedXml { .. }), "{}: {:?}", xml, err);
        }
    }

    #[test]
    fn test_predefined_entities() {
        let xml = "<t>&lt;&gt;&amp;&apos;&quot;</t>";
        assert_eq!(collect(xml, b"t").unwrap(), "<>&'\" ");
    }

    #[test]
    fn test_has_text_stops_at_first_word() {
        // Everything after the first word is never read.
        let xml = "<p>  <span> </span>word<span>x</wrong>";
        assert!(has_text(xml, b"p").unwrap());
        assert!(has_text("<p><![CDATA[x]]></p>", b"p").unwrap());
        assert!(has_text("<p>&#65;</p>", b"p").unwrap());
    }

    #[test]
    fn test_has_text_blank_element() {
        assert!(!has_text("<p> \t<span>\n</span>&#32;</p><p>next</p>", b"p").unwrap());
        assert!(!has_text("<p/>", b"p").unwrap());
    }

    #[test]
    fn test_has_text_unclosed() {
        let err = has_text("<root><p>  <span>", b"p").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { .. }), "{:?}", err);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 50_000;
        let mut xml = String::from("<p>");
        xml.push_str(&"<span>".repeat(depth));
        xml.push_str("deep");
        xml.push_str(&"</span>".repeat(depth));
        xml.push_str("</p>");
        assert_eq!(collect(&xml, b"p").unwrap(), "deep ");
    }
}
