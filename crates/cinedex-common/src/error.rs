//! Error types for Cinedex.

use thiserror::Error;

/// Result type alias using CinedexError.
pub type Result<T> = std::result::Result<T, CinedexError>;

/// Errors that can occur in Cinedex operations.
///
/// Absence of a title during search or removal is not an error; those
/// operations return `Option` instead.
#[derive(Debug, Error)]
pub enum CinedexError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Record errors
    #[error("Malformed record: expected {expected} fields, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    #[error("Invalid value for field {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    // Index errors
    #[error("Catalog is empty, cannot build an index")]
    EmptyCatalog,

    #[error("Index is empty")]
    EmptyIndex,
}
