//! Core scanning primitives
//!
//! This module contains the fundamental building blocks for tag scanning:
//! - Span: zero-copy byte ranges into the input
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: flat `<...>` token extraction

pub mod scanner;
pub mod span;
pub mod tokenizer;
