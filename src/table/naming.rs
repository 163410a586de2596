//! Column Naming
//!
//! One depth-first walk over the records assigns every leaf a column name
//! built from its ancestors' display names. Repeated sibling tags are told
//! apart by a numeric suffix: the first `phone` stays `phone`, the second
//! becomes `phone1`, the third `phone2`.
//!
//! The walk uses an explicit scope stack, so nesting depth is bounded by
//! memory rather than by the call stack.

use super::discard::DiscardSet;
use crate::config::ConvertOptions;
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use std::collections::HashMap;

/// Column names in the order the walk first met them
#[derive(Debug, Default, Clone)]
pub struct ColumnTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    /// False while every leaf feeding the column has a discarded tag name
    keep: Vec<bool>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one leaf occurrence under `name`, returning its slot
    pub fn insert(&mut self, name: &str, discarded: bool) -> usize {
        if let Some(&slot) = self.index.get(name) {
            self.keep[slot] |= !discarded;
            return slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), slot);
        self.keep.push(!discarded);
        slot
    }

    /// Names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop discarded columns and sort the rest
    pub fn finish(self) -> FinalColumnSet {
        let mut names: Vec<String> = self
            .names
            .into_iter()
            .zip(self.keep)
            .filter_map(|(name, keep)| keep.then_some(name))
            .collect();
        names.sort();
        FinalColumnSet::new(names)
    }
}

/// Sorted, authoritative header order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FinalColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FinalColumnSet {
    fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row position of a column
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Sibling scope of the walk: one per open container
struct Scope {
    next: Option<NodeId>,
    /// Qualified name -> repeats seen so far under this parent
    siblings: HashMap<String, u32>,
    /// Whether the owning container contributes to column paths
    in_path: bool,
    /// Duplicate suffixing applies (not at record level)
    counted: bool,
}

impl Scope {
    fn new(next: Option<NodeId>, in_path: bool, counted: bool) -> Self {
        Self {
            next,
            siblings: HashMap::new(),
            in_path,
            counted,
        }
    }
}

/// Assigns column names to every leaf of a document
pub struct ColumnNamer<'o> {
    options: &'o ConvertOptions,
    discards: &'o DiscardSet,
}

impl<'o> ColumnNamer<'o> {
    pub fn new(options: &'o ConvertOptions, discards: &'o DiscardSet) -> Self {
        Self { options, discards }
    }

    /// Name every leaf under the root and return the final column set
    pub fn assign(&self, doc: &mut Document<'_>) -> FinalColumnSet {
        self.discards.mark(doc);

        let mut table = ColumnTable::new();
        let first_record = doc.root().and_then(|r| doc.get(r)).and_then(|n| n.first_child);
        let mut scopes = vec![Scope::new(first_record, false, false)];
        // Display names of the containers between the record and the current node
        let mut path: Vec<String> = Vec::new();

        while let Some(scope) = scopes.last_mut() {
            let Some(id) = scope.next else {
                if scopes.pop().is_some_and(|s| s.in_path) {
                    path.pop();
                }
                continue;
            };
            let Some(node) = doc.get_mut(id) else {
                scope.next = None;
                continue;
            };
            scope.next = node.next_sibling;

            if self.options.is_skipped(&node.name) {
                continue;
            }

            if scope.counted {
                match scope.siblings.get_mut(&node.name) {
                    Some(count) => {
                        *count += 1;
                        node.duplicate_index = *count;
                        node.display_name = format!("{}{}", node.local_name(), count);
                    }
                    None => {
                        scope.siblings.insert(node.name.clone(), 0);
                    }
                }
            }
            let at_record = !scope.counted;

            if node.is_leaf() {
                let mut column = String::new();
                for ancestor in &path {
                    column.push_str(ancestor);
                    column.push_str(&self.options.path_separator);
                }
                column.push_str(&node.display_name);

                table.insert(&column, node.discard);
                node.column_name = Some(column);
            } else if let Some(child) = node.first_child {
                let in_path = !at_record;
                if in_path {
                    path.push(node.display_name.clone());
                }
                scopes.push(Scope::new(Some(child), in_path, true));
            }
        }

        log::debug!("named {} distinct leaf columns", table.len());
        let columns = table.finish();
        log::debug!("{} columns remain after discarding", columns.len());
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscardPolicy;
    use crate::core::tokenizer::tokenize;
    use crate::dom::builder::TreeBuilder;
    use crate::table::discard::DiscardAnalyzer;

    fn columns_for(input: &[u8], options: &ConvertOptions) -> Vec<String> {
        let tokens = tokenize(input).unwrap();
        let (mut doc, stats) = TreeBuilder::new(input, &tokens).build().unwrap();
        let discards = DiscardAnalyzer::new(&options.discard).analyze(&stats);
        ColumnNamer::new(options, &discards)
            .assign(&mut doc)
            .names()
            .to_vec()
    }

    fn columns(input: &[u8]) -> Vec<String> {
        columns_for(input, &ConvertOptions::default())
    }

    #[test]
    fn test_flat_records() {
        let cols = columns(b"<root><rec><b>x</b><a>1</a></rec><rec><a>2</a><b>y</b></rec></root>");
        assert_eq!(cols, vec!["a", "b"]);
    }

    #[test]
    fn test_path_prefix_excludes_record() {
        let cols = columns(
            b"<root><rec><addr><city>X</city><geo><lat>1</lat></geo></addr></rec></root>",
        );
        assert_eq!(cols, vec!["addr_city", "addr_geo_lat"]);
    }

    #[test]
    fn test_sibling_suffixes() {
        let cols = columns(
            b"<root><rec><phone>1</phone><phone>2</phone><phone>3</phone></rec></root>",
        );
        assert_eq!(cols, vec!["phone", "phone1", "phone2"]);
    }

    #[test]
    fn test_suffix_on_containers() {
        let cols = columns(
            b"<root><rec><addr><city>A</city></addr><addr><city>B</city></addr></rec></root>",
        );
        assert_eq!(cols, vec!["addr1_city", "addr_city"]);
    }

    #[test]
    fn test_counters_scoped_per_parent() {
        let input = b"<root><rec><p><x>1</x><x>2</x></p><q><x>3</x></q></rec>\
<rec><x>4</x></rec></root>";
        let cols = columns(input);
        assert_eq!(cols, vec!["p_x", "p_x1", "q_x", "x"]);
    }

    #[test]
    fn test_records_never_suffixed() {
        let input = b"<root><rec><a>1</a></rec><rec><a>2</a></rec><rec><a>3</a></rec></root>";
        assert_eq!(columns(input), vec!["a"]);
    }

    #[test]
    fn test_namespace_stripped() {
        let input = b"<rdf:RDF><schema:Person><schema:name>N</schema:name>\
<schema:name>M</schema:name></schema:Person></rdf:RDF>";
        assert_eq!(columns(input), vec!["name", "name1"]);
    }

    #[test]
    fn test_skip_tags() {
        let input = b"<root><rec><schema:created>2020</schema:created><a>1</a>\
<schema:modified><d>x</d></schema:modified><b>2</b></rec></root>";
        assert_eq!(columns(input), vec!["a", "b"]);
    }

    #[test]
    fn test_skipped_tag_does_not_count_as_sibling() {
        let options = ConvertOptions::new().with_skip_tags(["a"]);
        let cols = columns_for(b"<root><rec><a>1</a><a>2</a><b>3</b></rec></root>", &options);
        assert_eq!(cols, vec!["b"]);
    }

    #[test]
    fn test_discarded_names_removed() {
        let input = b"<root><rec><a>1</a><note></note></rec><rec><a>2</a><note>None</note>\
<note>None</note></rec></root>";
        assert_eq!(columns(input), vec!["a"]);

        let keep = ConvertOptions::new().with_discard(DiscardPolicy::keep_all());
        assert_eq!(columns_for(input, &keep), vec!["a", "note", "note1"]);
    }

    #[test]
    fn test_discard_flag_drives_exclusion() {
        let input = b"<root><rec><a>1</a><b>2</b></rec></root>";
        let tokens = tokenize(input).unwrap();
        let (mut doc, _) = TreeBuilder::new(input, &tokens).build().unwrap();
        let mut discards = DiscardSet::new();
        discards.insert("b".to_string());
        let options = ConvertOptions::default();
        let columns = ColumnNamer::new(&options, &discards).assign(&mut doc);
        assert_eq!(columns.names(), &["a"]);

        let rec = doc.records().next().unwrap();
        let flags: Vec<bool> = doc.children(rec).map(|id| doc.get(id).unwrap().discard).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_custom_separator() {
        let options = ConvertOptions::new().with_path_separator(".");
        let cols = columns_for(b"<root><rec><g><a>1</a></g></rec></root>", &options);
        assert_eq!(cols, vec!["g.a"]);
    }

    #[test]
    fn test_leaf_record() {
        assert_eq!(columns(b"<root><rec>1</rec><rec>2</rec></root>"), vec!["rec"]);
    }

    #[test]
    fn test_nodes_get_column_names() {
        let input = b"<root><rec><a>1</a><a>2</a></rec></root>";
        let tokens = tokenize(input).unwrap();
        let (mut doc, stats) = TreeBuilder::new(input, &tokens).build().unwrap();
        let options = ConvertOptions::default();
        let discards = DiscardAnalyzer::new(&options.discard).analyze(&stats);
        ColumnNamer::new(&options, &discards).assign(&mut doc);

        let rec = doc.records().next().unwrap();
        let kids: Vec<_> = doc.children(rec).collect();
        let second = doc.get(kids[1]).unwrap();
        assert_eq!(second.duplicate_index, 1);
        assert_eq!(second.display_name, "a1");
        assert_eq!(second.column_name.as_deref(), Some("a1"));
        assert_eq!(doc.get(kids[0]).unwrap().column_name.as_deref(), Some("a"));
    }
}
