//! Error types for sqlwhere

use thiserror::Error;

/// Result type alias for sqlwhere operations
pub type WhereResult<T> = Result<T, WhereError>;

/// Errors raised while building expressions, statements or previews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WhereError {
    /// The factory received a clause it cannot turn into an expression
    #[error("Expected string or Expression, {0} given")]
    InvalidClause(String),

    /// Several values were supplied and at least one of them is a collection
    #[error("Cannot construct expression with multiple array values")]
    AmbiguousValues,

    /// Values were supplied alongside an already-built expression
    #[error("Cannot pass values to an existing Expression object")]
    IllegalValueAttachment,

    /// Placeholders found in the statement don't match the bound values
    #[error(
        "Number of variables doesn't match number of parameters in statement \
         ({placeholders} placeholders, {values} values)"
    )]
    ParameterCountMismatch { placeholders: usize, values: usize },

    /// A value has no SQL literal representation
    #[error("Expected string or stringable value, {0} given")]
    UnsupportedValue(String),

    /// The same named parameter is bound to two different values
    #[error("Named parameter ':{0}' is bound to conflicting values")]
    DuplicateNamedValue(String),

    /// A field-helper placeholder mode is not valid for the operation
    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),

    /// CASE expression calls out of sequence
    #[error("Invalid CASE expression: {0}")]
    InvalidCase(String),

    /// INSERT rows of inconsistent shape
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl WhereError {
    /// Create a parameter count mismatch error
    pub fn count_mismatch(placeholders: usize, values: usize) -> Self {
        Self::ParameterCountMismatch {
            placeholders,
            values,
        }
    }

    /// Create an unsupported value error
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedValue(type_name.into())
    }

    /// Create an invalid placeholder error
    pub fn invalid_placeholder(message: impl Into<String>) -> Self {
        Self::InvalidPlaceholder(message.into())
    }

    /// Create an invalid CASE error
    pub fn invalid_case(message: impl Into<String>) -> Self {
        Self::InvalidCase(message.into())
    }

    /// Create an invalid row error
    pub fn invalid_row(message: impl Into<String>) -> Self {
        Self::InvalidRow(message.into())
    }

    /// Check if this is a placeholder/value count mismatch
    pub fn is_count_mismatch(&self) -> bool {
        matches!(self, Self::ParameterCountMismatch { .. })
    }

    /// Check if this is a duplicate named value error
    pub fn is_duplicate_named_value(&self) -> bool {
        matches!(self, Self::DuplicateNamedValue(_))
    }
}
