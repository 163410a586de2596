//! Table construction
//!
//! - Discard: per-tag-name uninformative-field detection
//! - Naming: path-derived, sibling-disambiguated column names
//! - Render: one quoted row per record, aligned to the sorted header

pub mod discard;
pub mod naming;
pub mod render;

pub use discard::{DiscardAnalyzer, DiscardSet};
pub use naming::{ColumnNamer, ColumnTable, FinalColumnSet};
pub use render::{Table, TableRenderer};
