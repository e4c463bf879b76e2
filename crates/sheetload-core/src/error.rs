//! Error types for sheetload-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetload-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed cell reference or column letters
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Data with no rows or no cells has no write extent
    #[error("No data to write")]
    EmptyData,
}
