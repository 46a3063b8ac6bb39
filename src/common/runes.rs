//! Character-exact slicing of UTF-8 byte buffers.
//!
//! The extraction budget is measured in characters (Unicode scalar values), so the
//! final cut has to land on a character boundary. [`take`] walks a byte buffer one
//! encoded character at a time and never returns a prefix that ends inside a
//! multi-byte sequence.

/// Outcome of a [`take`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeStatus {
    /// Exactly the requested number of characters was taken.
    Ok,
    /// The buffer ran out first; everything it held is returned.
    Insufficient,
    /// An invalid or truncated sequence was hit; the valid prefix is returned.
    InvalidEncoding,
}

/// Prefix returned by [`take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taken<'a> {
    /// Bytes of the whole characters taken. Always valid UTF-8.
    pub prefix: &'a [u8],
    /// Number of characters in `prefix`.
    pub chars: usize,
    pub status: TakeStatus,
}

impl<'a> Taken<'a> {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == TakeStatus::Ok
    }
}

/// Take the first `n` characters of `data`.
///
/// A truncated multi-byte sequence at the end of the buffer counts as invalid
/// encoding, not as running out of input.
pub fn take(data: &[u8], n: usize) -> Taken<'_> {
    let mut end = 0;
    let mut chars = 0;

    while chars < n {
        if end >= data.len() {
            return Taken { prefix: &data[..end], chars, status: TakeStatus::Insufficient };
        }

        let width = sequence_width(data[end]);
        if width == 0
            || end + width > data.len()
            || std::str::from_utf8(&data[end..end + width]).is_err()
        {
            return Taken { prefix: &data[..end], chars, status: TakeStatus::InvalidEncoding };
        }

        end += width;
        chars += 1;
    }

    Taken { prefix: &data[..end], chars, status: TakeStatus::Ok }
}

/// Length in bytes of the encoded character introduced by `lead`, or 0 if `lead`
/// cannot start a character.
#[inline]
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Largest character boundary of `s` that is `<= max`.
///
/// Used when the budget is counted in bytes: cutting there may leave the
/// result up to 3 bytes short of `max`, but never splits a character.
pub fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
