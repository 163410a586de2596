//! Tree Builder
//!
//! Rebuilds the element tree from the flat token list with an explicit
//! stack of open containers, and collects per-tag content statistics on
//! the way.
//!
//! Leaf detection uses one token of lookahead: an opening tag directly
//! followed by its own closing tag is a leaf whose content is the raw
//! bytes between the two. Anything else that opens is a container.

use super::document::Document;
use super::node::{Node, NodeId};
use crate::core::span::Span;
use crate::core::tokenizer::Token;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct trimmed leaf values seen per qualified tag name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentStats {
    values: BTreeMap<String, BTreeSet<String>>,
}

impl ContentStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one leaf occurrence; `value` is trimmed before storing
    pub fn record(&mut self, name: &str, value: &str) {
        let value = value.trim();
        match self.values.get_mut(name) {
            Some(set) => {
                if !set.contains(value) {
                    set.insert(value.to_string());
                }
            }
            None => {
                let mut set = BTreeSet::new();
                set.insert(value.to_string());
                self.values.insert(name.to_string(), set);
            }
        }
    }

    /// Distinct values seen for a tag name
    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.values.get(name)
    }

    /// Iterate over (tag name, distinct values), sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct leaf tag names
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder state for constructing a Document
pub struct TreeBuilder<'t, 'a> {
    input: &'a [u8],
    tokens: &'t [Token<'a>],
    doc: Document<'a>,
    /// Stack of open container IDs
    stack: Vec<NodeId>,
    stats: ContentStats,
    /// The root element has been closed; later elements are detached
    root_closed: bool,
}

impl<'t, 'a> TreeBuilder<'t, 'a> {
    /// Create a new builder over the input and its tokens
    pub fn new(input: &'a [u8], tokens: &'t [Token<'a>]) -> Self {
        Self {
            input,
            tokens,
            doc: Document::new(input),
            stack: Vec::with_capacity(32),
            stats: ContentStats::new(),
            root_closed: false,
        }
    }

    /// Consume every token and return the tree with its statistics
    pub fn build(mut self) -> Result<(Document<'a>, ContentStats)> {
        let tokens = self.tokens;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            if token.is_declaration() {
                i += 1;
                continue;
            }

            if self.doc.root().is_none() {
                self.start_root(token, i)?;
                i += 1;
                continue;
            }

            if token.is_self_closing {
                let end = token.span.end;
                self.add_leaf(token, Span::new(end, end));
                i += 1;
                continue;
            }

            if !token.is_closing {
                if let Some(next) = tokens.get(i + 1) {
                    if next.is_closing && next.name == token.name {
                        self.add_leaf(token, Span::new(token.span.end, next.span.start));
                        i += 2;
                        continue;
                    }
                }
                self.open_container(token);
                i += 1;
                continue;
            }

            self.close_container(token, i)?;
            i += 1;
        }

        if let Some(node) = self.stack.last().and_then(|&id| self.doc.get(id)) {
            return Err(Error::UnclosedTag {
                name: node.name.clone(),
                offset: node.offset,
            });
        }
        if self.doc.root().is_none() {
            return Err(Error::EmptyDocument);
        }

        log::debug!(
            "built tree of {} nodes, {} records, {} leaf tag names",
            self.doc.node_count(),
            self.doc.records().count(),
            self.stats.len()
        );
        log::trace!("tree outline:\n{}", self.doc.outline());

        Ok((self.doc, self.stats))
    }

    fn start_root(&mut self, token: &Token<'a>, index: usize) -> Result<()> {
        if token.is_closing {
            return Err(Error::UnexpectedClose {
                found: token.name.to_string(),
                index,
                offset: token.span.start,
            });
        }
        let id = self.doc.add_node(Node::element(&token.name, token.span.start));
        self.doc.set_root(id);
        if token.is_self_closing {
            self.root_closed = true;
        } else {
            self.stack.push(id);
        }
        Ok(())
    }

    fn add_leaf(&mut self, token: &Token<'a>, content: Span) {
        let id = self
            .doc
            .add_node(Node::leaf(&token.name, token.span.start, content));
        if self.attach(id) {
            let text = content.text(self.input);
            self.stats.record(&token.name, &text);
        }
    }

    fn open_container(&mut self, token: &Token<'a>) {
        let id = self.doc.add_node(Node::element(&token.name, token.span.start));
        self.attach(id);
        self.stack.push(id);
    }

    fn close_container(&mut self, token: &Token<'a>, index: usize) -> Result<()> {
        let Some(&top) = self.stack.last() else {
            return Err(Error::UnexpectedClose {
                found: token.name.to_string(),
                index,
                offset: token.span.start,
            });
        };
        let expected = self.doc.get(top).map(|n| n.name.as_str()).unwrap_or_default();
        if expected != token.name {
            return Err(Error::MismatchedClose {
                expected: expected.to_string(),
                found: token.name.to_string(),
                index,
                offset: token.span.start,
            });
        }
        self.stack.pop();
        if self.stack.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    /// Attach to the open container; false if the node is outside the root
    fn attach(&mut self, id: NodeId) -> bool {
        match self.stack.last() {
            Some(&parent) => self.doc.append_child(parent, id),
            None => {
                if let Some(node) = self.doc.get(id) {
                    log::warn!(
                        "element '<{}>' at byte {} lies outside the root element, ignoring",
                        node.name,
                        node.offset
                    );
                }
            }
        }
        !self.root_closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;

    fn build(input: &[u8]) -> Result<(Document<'_>, ContentStats)> {
        let tokens = tokenize(input)?;
        TreeBuilder::new(input, &tokens).build()
    }

    fn names(doc: &Document<'_>, ids: impl Iterator<Item = NodeId>) -> Vec<String> {
        ids.map(|id| doc.get(id).unwrap().name.clone()).collect()
    }

    #[test]
    fn test_records_and_leaves() {
        let input = b"<root><rec><a>1</a><b>x</b></rec><rec><a>2</a></rec></root>";
        let (doc, stats) = build(input).unwrap();

        let records: Vec<NodeId> = doc.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(names(&doc, doc.children(records[0])), vec!["a", "b"]);

        let a = doc.children(records[0]).next().unwrap();
        assert!(doc.get(a).unwrap().is_leaf());
        assert_eq!(doc.content(a), "1");

        let a_values: Vec<&str> = stats.values("a").unwrap().iter().map(|s| s.as_str()).collect();
        assert_eq!(a_values, vec!["1", "2"]);
    }

    #[test]
    fn test_declaration_skipped() {
        let input = b"<?xml version=\"1.0\"?>\n<root><rec><a>1</a></rec></root>";
        let (doc, _) = build(input).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.get(root).unwrap().name, "root");
    }

    #[test]
    fn test_content_kept_raw() {
        let input = b"<root><rec><a>  padded  </a></rec></root>";
        let (doc, stats) = build(input).unwrap();
        let rec = doc.records().next().unwrap();
        let a = doc.children(rec).next().unwrap();
        assert_eq!(doc.content(a), "  padded  ");
        assert!(stats.values("a").unwrap().contains("padded"));
    }

    #[test]
    fn test_self_closing_is_empty_leaf() {
        let input = b"<root><rec><url rdf:resource=\"x\"/><a>1</a></rec></root>";
        let (doc, stats) = build(input).unwrap();
        let rec = doc.records().next().unwrap();
        let url = doc.children(rec).next().unwrap();
        let node = doc.get(url).unwrap();
        assert!(node.is_leaf());
        assert_eq!(doc.content(url), "");
        assert!(stats.values("url").unwrap().contains(""));
    }

    #[test]
    fn test_empty_pair_is_leaf_not_container() {
        let input = b"<root><rec><note></note></rec></root>";
        let (doc, _) = build(input).unwrap();
        let rec = doc.records().next().unwrap();
        let note = doc.children(rec).next().unwrap();
        assert!(doc.get(note).unwrap().is_leaf());
    }

    #[test]
    fn test_nested_containers() {
        let input = b"<root><rec><addr><city>X</city><zip>1</zip></addr></rec></root>";
        let (doc, _) = build(input).unwrap();
        let rec = doc.records().next().unwrap();
        let addr = doc.children(rec).next().unwrap();
        let node = doc.get(addr).unwrap();
        assert!(node.is_container);
        assert_eq!(node.child_count, 2);
        assert_eq!(names(&doc, doc.children(addr)), vec!["city", "zip"]);
    }

    #[test]
    fn test_namespace_must_match_exactly() {
        let input = b"<root><rec><s:a><b>1</b></t:a></rec></root>";
        match build(input) {
            Err(Error::MismatchedClose {
                expected,
                found,
                index,
                offset,
            }) => {
                assert_eq!(expected, "s:a");
                assert_eq!(found, "t:a");
                assert_eq!(index, 5);
                assert_eq!(offset, 24);
            }
            other => panic!("expected mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unexpected_close() {
        let err = build(b"</root>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedClose { index: 0, offset: 0, .. }));

        let err = build(b"<root></root></extra>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedClose { index: 2, offset: 13, .. }));
    }

    #[test]
    fn test_unclosed() {
        let err = build(b"<root><rec><a>1</a>").unwrap_err();
        match err {
            Error::UnclosedTag { name, offset } => {
                assert_eq!(name, "rec");
                assert_eq!(offset, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(build(b"").unwrap_err(), Error::EmptyDocument));
        assert!(matches!(
            build(b"<?xml version=\"1.0\"?>").unwrap_err(),
            Error::EmptyDocument
        ));
    }

    #[test]
    fn test_content_after_root_is_detached() {
        let input = b"<root><rec><a>1</a></rec></root><rec><a>zzz</a></rec>";
        let (doc, stats) = build(input).unwrap();
        assert_eq!(doc.records().count(), 1);
        assert!(!stats.values("a").unwrap().contains("zzz"));
    }

    #[test]
    fn test_stats_dedup() {
        let mut stats = ContentStats::new();
        stats.record("a", " x ");
        stats.record("a", "x");
        stats.record("a", "");
        assert_eq!(stats.values("a").unwrap().len(), 2);
        assert_eq!(stats.len(), 1);
        assert!(stats.values("b").is_none());
    }
}
