//! Filter compilation error types

use thiserror::Error;

use super::types::Operator;

/// Errors produced while parsing, resolving or compiling a filter condition.
///
/// Errors are local to one condition; the caller decides whether to drop the
/// condition or abort the whole query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Filter condition has no operator")]
    MissingOperator,

    #[error("Filter condition has no key")]
    MissingKey,

    #[error("Operator '{operator}' requires a value")]
    MissingValue { operator: Operator },

    #[error("Expected a numeric value, got '{value}'")]
    InvalidNumber { value: String },

    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),

    #[error("Filter JSON exceeds maximum size of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Maximum {limit} filter conditions allowed")]
    TooMany { limit: usize },
}
