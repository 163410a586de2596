//! Error types for the converter.
//!
//! Every structural error is fatal: malformed input is never repaired.

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `<` with no `>` before the next `<` or the end of input
    #[error("unterminated tag at byte {offset}: '{excerpt}'")]
    UnterminatedTag {
        /// Byte offset of the opening `<`
        offset: usize,
        /// Bounded excerpt of the input starting at the `<`
        excerpt: String,
    },

    /// A closing tag that does not match the open container
    #[error("mismatched closing tag at byte {offset} (token {index}): expected '</{expected}>', found '</{found}>'")]
    MismatchedClose {
        /// Name of the currently open container
        expected: String,
        /// Name found in the closing tag
        found: String,
        /// Token index of the closing tag
        index: usize,
        /// Byte offset of the closing tag
        offset: usize,
    },

    /// A closing tag while no container is open
    #[error("closing tag '</{found}>' at byte {offset} (token {index}) has no open element")]
    UnexpectedClose {
        /// Name found in the closing tag
        found: String,
        /// Token index of the closing tag
        index: usize,
        /// Byte offset of the closing tag
        offset: usize,
    },

    /// End of input reached with a container still open
    #[error("element '<{name}>' opened at byte {offset} is never closed")]
    UnclosedTag {
        /// Name of the unclosed element
        name: String,
        /// Byte offset of its opening tag
        offset: usize,
    },

    /// The input holds no element at all
    #[error("document contains no elements")]
    EmptyDocument,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by malformed markup (as opposed to IO)
    pub fn is_structural(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
