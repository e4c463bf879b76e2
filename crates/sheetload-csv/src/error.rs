//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while loading delimited text
#[derive(Debug, Error)]
pub enum CsvError {
    /// The source could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed content
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl CsvError {
    /// True if the content could not be read at all, as opposed to read but malformed
    ///
    /// Content that is not valid UTF-8 was read, so it counts as malformed.
    pub fn is_read_error(&self) -> bool {
        match self {
            CsvError::Io(e) => e.kind() != std::io::ErrorKind::InvalidData,
            CsvError::Csv(e) => matches!(e.kind(), csv::ErrorKind::Io(_)),
            CsvError::Parse { .. } => false,
        }
    }

    /// True if the source does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CsvError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
