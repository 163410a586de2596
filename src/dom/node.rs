//! Tree node representation
//!
//! Uses NodeId (u32) for compact references into the document arena.
//! Children are reached through `first_child` and their `next_sibling` chain.

use crate::core::span::Span;
use crate::dom::namespace::strip_namespace;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// An element in the arena
#[derive(Debug, Clone)]
pub struct Node {
    /// Qualified tag name, used for matching and discard lookup
    pub name: String,
    /// Namespace-stripped name, suffixed when repeated among siblings
    pub display_name: String,
    /// Raw text between the opening and closing tag (leaves only)
    pub content: Span,
    /// Byte offset of the opening tag
    pub offset: usize,
    /// Eldest child
    pub first_child: Option<NodeId>,
    /// Youngest child, for appending
    pub last_child: Option<NodeId>,
    /// Following sibling
    pub next_sibling: Option<NodeId>,
    /// Number of direct children
    pub child_count: u32,
    /// True iff the node has at least one child
    pub is_container: bool,
    /// Field never carries information
    pub discard: bool,
    /// 0 for the first sibling with this name, N for the Nth repeat
    pub duplicate_index: u32,
    /// Path-qualified column, assigned by the column namer (leaves only)
    pub column_name: Option<String>,
}

impl Node {
    /// Create a new element node with no links
    pub fn element(name: &str, offset: usize) -> Self {
        Node {
            name: name.to_string(),
            display_name: strip_namespace(name).to_string(),
            content: Span::empty(),
            offset,
            first_child: None,
            last_child: None,
            next_sibling: None,
            child_count: 0,
            is_container: false,
            discard: false,
            duplicate_index: 0,
            column_name: None,
        }
    }

    /// Create a leaf node with text content
    pub fn leaf(name: &str, offset: usize, content: Span) -> Self {
        Node {
            content,
            ..Node::element(name, offset)
        }
    }

    /// Check if this node carries content rather than children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.is_container
    }

    /// Namespace-stripped name without any duplicate suffix
    #[inline]
    pub fn local_name(&self) -> &str {
        strip_namespace(&self.name)
    }
}
