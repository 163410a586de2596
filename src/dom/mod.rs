//! DOM Module - Arena-based element tree
//!
//! Implements the tree the table is flattened from:
//! - Arena allocation for nodes
//! - NodeId (u32) indices, first-child / next-sibling links
//! - Stack-based tree building with content statistics

pub mod builder;
pub mod document;
pub mod namespace;
pub mod node;

pub use builder::{ContentStats, TreeBuilder};
pub use document::Document;
pub use node::{Node, NodeId};
