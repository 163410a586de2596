//! Uninformative-field detection
//!
//! The decision is scoped by qualified tag name: it applies to every
//! occurrence of that name anywhere in the document.

use crate::config::DiscardPolicy;
use crate::dom::builder::ContentStats;
use crate::dom::document::Document;
use std::collections::HashSet;

/// Qualified tag names excluded from the table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscardSet {
    names: HashSet<String>,
}

impl DiscardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Set the `discard` flag on every node whose tag name is discarded
    pub fn mark(&self, doc: &mut Document<'_>) {
        for id in 0..doc.node_count() as u32 {
            if let Some(node) = doc.get_mut(id) {
                node.discard = self.names.contains(&node.name);
            }
        }
    }
}

/// Applies a DiscardPolicy to collected content statistics
pub struct DiscardAnalyzer<'p> {
    policy: &'p DiscardPolicy,
}

impl<'p> DiscardAnalyzer<'p> {
    pub fn new(policy: &'p DiscardPolicy) -> Self {
        Self { policy }
    }

    /// Decide, per tag name, whether the field is worth a column
    pub fn analyze(&self, stats: &ContentStats) -> DiscardSet {
        let mut discards = DiscardSet::new();
        if !self.policy.enabled {
            return discards;
        }
        for (name, values) in stats.iter() {
            if self.is_uninformative(values.iter().map(|v| v.as_str()), values.len()) {
                log::debug!("discarding uninformative field '{}'", name);
                discards.insert(name);
            }
        }
        discards
    }

    fn is_uninformative<'v>(&self, mut values: impl Iterator<Item = &'v str>, distinct: usize) -> bool {
        if distinct == 0 {
            return true;
        }
        if distinct > self.policy.max_distinct {
            return false;
        }
        values.all(|v| self.policy.is_uninformative(v))
    }
}
