//! Whitespace normalization for collected text fragments.

/// XML whitespace plus form feed: `\t`, `\n`, `\x0C`, `\r` and space.
///
/// Other Unicode spaces (such as U+00A0) are kept as text.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// # Examples
///
/// ```rust
/// use docslice::common::normalize::normalize;
///
/// assert_eq!(normalize("  Hello \n\t  world  "), "Hello world");
/// assert_eq!(normalize(" \r\n "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split(is_space).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
