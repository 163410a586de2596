//! Document - Arena-based element tree
//!
//! Efficient tree storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - Zero-copy leaf content via spans

use super::node::{Node, NodeId};
use std::borrow::Cow;
use std::fmt::Write as _;

/// An element tree stored in arena format
#[derive(Debug)]
pub struct Document<'a> {
    /// Original input (for zero-copy text extraction)
    input: &'a [u8],
    /// Arena of nodes
    nodes: Vec<Node>,
    /// Root element node ID
    root: Option<NodeId>,
}

impl<'a> Document<'a> {
    /// Create an empty document over the given input
    pub fn new(input: &'a [u8]) -> Self {
        Document {
            input,
            nodes: Vec::with_capacity((input.len() / 32).max(16)),
            root: None,
        }
    }

    /// Add a detached node to the arena
    pub fn add_node(&mut self, node: Node) -> NodeId {
        debug_assert!(
            NodeId::try_from(self.nodes.len()).is_ok(),
            "node arena exceeds NodeId range"
        );
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Mark a node as the root element
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Root element ID
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Get a mutable node by ID
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id as usize)
    }

    /// Total number of nodes, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append `child` as the youngest child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last = match self.get_mut(parent) {
            Some(p) => {
                let prev = p.last_child;
                if p.first_child.is_none() {
                    p.first_child = Some(child);
                }
                p.last_child = Some(child);
                p.child_count += 1;
                p.is_container = true;
                prev
            }
            None => return,
        };

        if let Some(last) = prev_last {
            if let Some(sib) = self.get_mut(last) {
                sib.next_sibling = Some(child);
            }
        }
    }

    /// Leaf content as text, invalid UTF-8 replaced
    pub fn content(&self, id: NodeId) -> Cow<'a, str> {
        match self.get(id) {
            Some(node) => node.content.text(self.input),
            None => Cow::Borrowed(""),
        }
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_, 'a> {
        let first = self.get(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over the records: the root's direct children
    pub fn records(&self) -> ChildIter<'_, 'a> {
        match self.root {
            Some(root) => self.children(root),
            None => ChildIter { doc: self, next: None },
        }
    }

    /// Iterate over a node and all its descendants in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_, 'a> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        DescendantIter { doc: self, stack, top: id }
    }

    /// Indented dump of the tree, one `name:content` line per node
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![(root, 0usize)];
        while let Some((id, level)) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            let _ = writeln!(
                out,
                "{}{}:{}",
                "    ".repeat(level),
                node.name.replace(':', "_"),
                node.content.text(self.input)
            );
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children.into_iter().rev() {
                stack.push((child, level + 1));
            }
        }
        out
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d, 'a> {
    doc: &'d Document<'a>,
    next: Option<NodeId>,
}

impl<'d, 'a> Iterator for ChildIter<'d, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order iterator over a subtree, first child before next sibling
pub struct DescendantIter<'d, 'a> {
    doc: &'d Document<'a>,
    stack: Vec<NodeId>,
    top: NodeId,
}

impl<'d, 'a> Iterator for DescendantIter<'d, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.get(current) {
            // The subtree's own top node has no siblings to visit.
            if current != self.top {
                if let Some(sib) = node.next_sibling {
                    self.stack.push(sib);
                }
            }
            if let Some(child) = node.first_child {
                self.stack.push(child);
            }
        }
        Some(current)
    }
}
