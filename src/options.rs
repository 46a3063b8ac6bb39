/// Configuration for limited extraction.
///
/// # Examples
///
/// ```rust
/// use docslice::{ExtractOptions, LimitUnit};
///
/// // 1000 characters
/// let options = ExtractOptions::default();
///
/// // Or customize
/// let options = ExtractOptions::new()
///     .with_limit(4096)
///     .with_unit(LimitUnit::Bytes);
/// assert_eq!(options.limit, 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum size of the returned text, measured in `unit`
    pub limit: usize,
    /// What `limit` counts
    pub unit: LimitUnit,
}

/// Unit the extraction budget is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitUnit {
    /// Unicode scalar values
    #[default]
    Chars,
    /// UTF-8 bytes; the result may stop up to 3 bytes short so that no
    /// character is split
    Bytes,
}

impl LimitUnit {
    /// Size of `text` in this unit.
    #[inline]
    pub fn measure(self, text: &str) -> usize {
        match self {
            LimitUnit::Chars => text.chars().count(),
            LimitUnit::Bytes => text.len(),
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            limit: 1000,
            unit: LimitUnit::Chars,
        }
    }
}

impl ExtractOptions {
    /// Create a new `ExtractOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Budget of `limit` characters.
    #[inline]
    pub fn chars(limit: usize) -> Self {
        Self { limit, unit: LimitUnit::Chars }
    }

    /// Budget of `limit` UTF-8 bytes.
    #[inline]
    pub fn bytes(limit: usize) -> Self {
        Self { limit, unit: LimitUnit::Bytes }
    }

    /// Set the budget size.
    #[inline]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the budget unit.
    #[inline]
    pub fn with_unit(mut self, unit: LimitUnit) -> Self {
        self.unit = unit;
        self
    }
}
