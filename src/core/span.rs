//! Span - byte range into the original input
//!
//! Zero-copy reference to a portion of the input document.
//! Used for leaf text content.

use std::borrow::Cow;

/// A half-open byte range `[start, end)` into the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span (used for "no content")
    #[inline]
    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract the byte slice from input
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        if self.start <= self.end && self.end <= input.len() {
            &input[self.start..self.end]
        } else {
            &[]
        }
    }

    /// Extract as text, replacing invalid UTF-8 sequences
    #[inline]
    pub fn text<'a>(&self, input: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(self.slice(input))
    }
}
