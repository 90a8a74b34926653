//! Error types for filter compilation.

/// Errors raised while compiling a filter or assembling a statement.
///
/// A malformed filter is a programming error on the caller's side: the
/// compiler fails the whole call and never returns a partial fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The filter tree does not have the shape the compiler expects.
    #[error("malformed filter: {detail}")]
    MalformedFilter {
        /// What was being compiled and the offending node.
        detail: String,
    },

    /// An UPDATE was asked for without any column to set.
    #[error("no columns to set in UPDATE {table}")]
    EmptyAssignments {
        /// The table being updated.
        table: String,
    },
}

impl FilterError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedFilter {
            detail: detail.into(),
        }
    }

    /// Returns the diagnostic detail: the offending node for a malformed
    /// filter, the table for an empty assignment list.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::MalformedFilter { detail } => detail,
            Self::EmptyAssignments { table } => table,
        }
    }
}

/// Result type for filter compilation and statement building.
pub type Result<T> = std::result::Result<T, FilterError>;
