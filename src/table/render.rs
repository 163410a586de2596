//! Table rendering
//!
//! Re-walks each record's subtree and places leaf content into the slot of
//! its column. Field order follows the sorted header, not the document.

use super::naming::FinalColumnSet;
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::error::Result;
use std::io::Write;

/// Header plus one row of raw (unquoted) field values per record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: u8,
}

impl Table {
    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Unquoted field values, one row per record
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header names joined by the delimiter, unquoted
    pub fn header_line(&self) -> String {
        self.columns.join(self.delimiter_str())
    }

    /// Data lines with every field quoted
    pub fn row_lines(&self) -> impl Iterator<Item = String> + '_ {
        let delimiter = self.delimiter_str();
        self.rows.iter().map(move |row| {
            row.iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(delimiter)
        })
    }

    /// Write header then rows, one per line
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.header_line())?;
        for line in self.row_lines() {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Whole table as delimited text
    pub fn to_csv_string(&self) -> String {
        let mut out = self.header_line();
        out.push('\n');
        for line in self.row_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn delimiter_str(&self) -> &str {
        // Always ASCII, see TableRenderer::with_delimiter.
        std::str::from_utf8(std::slice::from_ref(&self.delimiter)).unwrap_or(",")
    }
}

/// Wrap in double quotes, doubling embedded quotes
pub fn quote(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Builds a Table from a named document
pub struct TableRenderer<'d, 'a> {
    doc: &'d Document<'a>,
    columns: &'d FinalColumnSet,
    delimiter: u8,
}

impl<'d, 'a> TableRenderer<'d, 'a> {
    pub fn new(doc: &'d Document<'a>, columns: &'d FinalColumnSet) -> Self {
        Self {
            doc,
            columns,
            delimiter: b',',
        }
    }

    /// Use another field delimiter; non-ASCII bytes fall back to ','
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = if delimiter.is_ascii() { delimiter } else { b',' };
        self
    }

    /// One row per record, in document order
    pub fn render(&self) -> Table {
        let rows: Vec<Vec<String>> = self.doc.records().map(|r| self.render_row(r)).collect();
        log::debug!(
            "rendered {} rows of {} columns",
            rows.len(),
            self.columns.len()
        );
        Table {
            columns: self.columns.names().to_vec(),
            rows,
            delimiter: self.delimiter,
        }
    }

    fn render_row(&self, record: NodeId) -> Vec<String> {
        let mut fields = vec![String::new(); self.columns.len()];
        for id in self.doc.descendants(record) {
            let Some(node) = self.doc.get(id) else { continue };
            if !node.is_leaf() {
                continue;
            }
            let Some(slot) = node
                .column_name
                .as_deref()
                .and_then(|c| self.columns.index_of(c))
            else {
                continue;
            };
            let content = self.doc.content(id);
            fields[slot] = if content.trim().is_empty() {
                String::new()
            } else {
                content.into_owned()
            };
        }
        fields
    }
}
