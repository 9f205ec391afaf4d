//! Error types for article-gravity.
//!
//! Scoring, ranking and formatting never fail on a well-formed tree; errors
//! only come from empty input or from caller-supplied patterns and selectors.

use crate::patterns::PatternKind;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTML input was empty.
    #[error("HTML input is empty")]
    EmptyInput,

    /// A replacement classification pattern failed to compile.
    #[error("Invalid {kind:?} pattern: {source}")]
    InvalidPattern {
        /// Which pattern set was being replaced.
        kind: PatternKind,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A nodes-to-keep selector failed to parse.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
