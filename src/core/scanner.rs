//! SIMD-accelerated tag scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::memchr;

/// Maximum length of an error excerpt, in bytes
pub const EXCERPT_LEN: usize = 100;

/// Scanner for angle-bracket delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Find next '<' (tag start) at or after the current position
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        self.find_byte_from(b'<', self.pos)
    }

    /// Find the '>' closing a tag that starts at `open`.
    ///
    /// Returns None when there is no '>' before the next '<' or the end
    /// of input.
    pub fn find_tag_end(&self, open: usize) -> Option<usize> {
        let from = open + 1;
        let close = self.find_byte_from(b'>', from)?;
        match self.find_byte_from(b'<', from) {
            Some(next_open) if next_open < close => None,
            _ => Some(close),
        }
    }

    /// Find next occurrence of a byte at or after `from`
    #[inline]
    pub fn find_byte_from(&self, byte: u8, from: usize) -> Option<usize> {
        if from >= self.input.len() {
            return None;
        }
        memchr(byte, &self.input[from..]).map(|i| from + i)
    }

    /// Bounded, lossily decoded excerpt starting at `offset`
    pub fn excerpt(&self, offset: usize) -> String {
        let start = offset.min(self.input.len());
        let end = (start + EXCERPT_LEN).min(self.input.len());
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }
}

/// Check if byte is XML whitespace (space, tab, newline, carriage return)
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
