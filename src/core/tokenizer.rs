//! Tag Tokenizer - flat scan of `<...>` spans
//!
//! Produces one token per angle-bracket span, in document order. Text
//! between tags is not tokenized: leaf content is recovered later from the
//! byte gap between an opening tag and its matching close.
//!
//! No nesting or escaping rules apply. CDATA sections, comments and
//! processing instructions are scanned like any other span.

use super::scanner::{is_whitespace, Scanner};
use super::span::Span;
use crate::dom::namespace::strip_namespace;
use crate::error::{Error, Result};
use std::borrow::Cow;

/// Prefix identifying the XML declaration token
const XML_DECLARATION: &[u8] = b"<?xml";

/// One scanned `<...>` span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Raw bytes, angle brackets included
    pub raw: &'a [u8],
    /// Qualified tag name (namespace prefix kept, attributes dropped)
    pub name: Cow<'a, str>,
    /// Byte range of the whole span, '>' included
    pub span: Span,
    /// Starts with `</`
    pub is_closing: bool,
    /// Ends with `/>`
    pub is_self_closing: bool,
}

impl<'a> Token<'a> {
    fn from_span(input: &'a [u8], start: usize, close: usize) -> Self {
        let raw = &input[start..=close];
        let is_closing = raw.get(1) == Some(&b'/');
        let is_self_closing = !is_closing && raw.len() >= 3 && raw[raw.len() - 2] == b'/';

        let name_start = if is_closing { 2 } else { 1 };
        let name_end = if is_self_closing {
            raw.len() - 2
        } else {
            raw.len() - 1
        };
        let inner = if name_start < name_end {
            &raw[name_start..name_end]
        } else {
            &[]
        };
        let name_len = inner.iter().position(|&b| is_whitespace(b)).unwrap_or(inner.len());

        Token {
            raw,
            name: String::from_utf8_lossy(&inner[..name_len]),
            span: Span::new(start, close + 1),
            is_closing,
            is_self_closing,
        }
    }

    /// Tag name with the namespace prefix removed
    #[inline]
    pub fn local_name(&self) -> &str {
        strip_namespace(&self.name)
    }

    /// True for the `<?xml ...?>` declaration
    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.raw.starts_with(XML_DECLARATION)
    }

    /// True for an opening tag that is not self-closing
    #[inline]
    pub fn is_opening(&self) -> bool {
        !self.is_closing && !self.is_self_closing
    }
}

/// Pull tokenizer over an in-memory buffer
pub struct Tokenizer<'a> {
    input: &'a [u8],
    scanner: Scanner<'a>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            input,
            scanner: Scanner::new(input),
            failed: false,
        }
    }

    /// Get the next token, or None at end of input.
    ///
    /// After an error the tokenizer yields nothing further.
    pub fn next_token(&mut self) -> Option<Result<Token<'a>>> {
        if self.failed || self.scanner.is_eof() {
            return None;
        }
        let start = self.scanner.find_tag_start()?;
        let Some(close) = self.scanner.find_tag_end(start) else {
            self.failed = true;
            return Some(Err(Error::UnterminatedTag {
                offset: start,
                excerpt: self.scanner.excerpt(start),
            }));
        };
        self.scanner.set_position(close + 1);
        Some(Ok(Token::from_span(self.input, start, close)))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Scan the whole buffer into tokens
pub fn tokenize(input: &[u8]) -> Result<Vec<Token<'_>>> {
    let tokens = Tokenizer::new(input).collect::<Result<Vec<_>>>()?;
    log::debug!("tokenized {} bytes into {} tags", input.len(), tokens.len());
    Ok(tokens)
}
