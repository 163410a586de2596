//! xml2csv - Flatten schema-less XML into a delimited table
//!
//! Pipeline, each stage feeding the next:
//! 1. Tokenizer: flat `<...>` spans via memchr scanning
//! 2. TreeBuilder: arena tree from an explicit open-tag stack, plus
//!    per-tag content statistics
//! 3. DiscardAnalyzer: tag names whose content never carries information
//! 4. ColumnNamer: path-derived, sibling-disambiguated column names
//! 5. TableRenderer: one quoted row per record under a sorted header
//!
//! Records are the direct children of the document's root element.
//!
//! ```
//! let table = xml2csv::convert(b"<root><rec><a>1</a><b>x</b></rec></root>").unwrap();
//! assert_eq!(table.to_csv_string(), "a,b\n\"1\",\"x\"\n");
//! ```

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod table;

pub use config::{ConvertOptions, DiscardPolicy};
pub use error::{Error, Result};
pub use table::{Table, TableRenderer};

use crate::core::tokenizer::tokenize;
use dom::TreeBuilder;
use std::io::Read;
use table::{ColumnNamer, DiscardAnalyzer};

/// Convert a whole document with default options
pub fn convert(input: &[u8]) -> Result<Table> {
    convert_with_options(input, &ConvertOptions::default())
}

/// Convert a whole document
pub fn convert_with_options(input: &[u8], options: &ConvertOptions) -> Result<Table> {
    let tokens = tokenize(input)?;
    let (mut doc, stats) = TreeBuilder::new(input, &tokens).build()?;
    let discards = DiscardAnalyzer::new(&options.discard).analyze(&stats);
    let columns = ColumnNamer::new(options, &discards).assign(&mut doc);
    Ok(TableRenderer::new(&doc, &columns)
        .with_delimiter(options.delimiter)
        .render())
}

/// Read a reader to its end, then convert the buffer
pub fn convert_reader<R: Read>(mut reader: R, options: &ConvertOptions) -> Result<Table> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    log::debug!("read {} bytes of input", input.len());
    convert_with_options(&input, options)
}
