//! Error types for dataset validation

use thiserror::Error;

/// Reasons a payload is not an acceptable [`NumericSample`](crate::NumericSample).
///
/// Variants are ordered the way the validator checks them; the first failing
/// check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field 'data' is required")]
    MissingData,

    #[error("'data' must be a list of numbers")]
    NotAList,

    #[error("the list cannot be empty")]
    Empty,

    #[error("all elements must be numbers")]
    NonNumeric,

    #[error("all elements must be finite numbers")]
    NonFinite,

    #[error("need at least {min} numbers for the analysis, got {count}")]
    TooFew { count: usize, min: usize },

    #[error("the values are too far apart to analyze")]
    SpreadTooLarge,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
