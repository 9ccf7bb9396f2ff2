//! Error types for filter dispatch, kernels and timing.

use thiserror::Error;

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised at the boundary of the call that violates a contract.
///
/// None of these are transient; they all describe bad input or a bad
/// lookup and are surfaced to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown filter: {0:?}")]
    UnknownFilter(String),

    #[error("Unknown implementation: {0:?}")]
    UnknownImplementation(String),

    #[error("Implementation {implementation} does not provide the {filter} filter")]
    UnsupportedCombination {
        filter: String,
        implementation: String,
    },
}
