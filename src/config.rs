//! Conversion options.

/// Tags never given a column, matched on their qualified name
pub const DEFAULT_SKIP_TAGS: [&str; 2] = ["schema:created", "schema:modified"];

/// Heuristic deciding when a field carries no information.
///
/// A tag name is discarded when no value was ever observed for it, or when
/// it saw at most `max_distinct` distinct values and every one of them is
/// listed in `uninformative`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardPolicy {
    /// Turn discarding off entirely
    pub enabled: bool,
    /// Above this many distinct values a field is always kept
    pub max_distinct: usize,
    /// Trimmed values that count as "no information"
    pub uninformative: Vec<String>,
}

impl Default for DiscardPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distinct: 2,
            uninformative: vec![String::new(), "None".to_string()],
        }
    }
}

impl DiscardPolicy {
    /// Policy that keeps every field
    pub fn keep_all() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Check whether a trimmed value counts as "no information"
    pub fn is_uninformative(&self, value: &str) -> bool {
        self.uninformative.iter().any(|u| u == value)
    }
}

/// Options for a single conversion.
///
/// # Example
///
/// ```
/// use xml2csv::ConvertOptions;
///
/// let options = ConvertOptions::new()
///     .with_delimiter(b';')
///     .with_path_separator(".");
/// assert_eq!(options.delimiter, b';');
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Field delimiter for header and rows
    pub delimiter: u8,
    /// Joins ancestor names in a column path
    pub path_separator: String,
    /// Qualified tag names excluded from naming, along with their subtrees
    pub skip_tags: Vec<String>,
    /// Uninformative-field heuristic
    pub discard: DiscardPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// Default options: comma delimiter, `_` separator, default skip tags
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            path_separator: "_".to_string(),
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|s| s.to_string()).collect(),
            discard: DiscardPolicy::default(),
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the string joining ancestor names in a column path
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Replace the skipped tag names
    pub fn with_skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the discard policy
    pub fn with_discard(mut self, policy: DiscardPolicy) -> Self {
        self.discard = policy;
        self
    }

    /// Check whether a qualified tag name is skipped during naming
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_tags.iter().any(|t| t == name)
    }
}
