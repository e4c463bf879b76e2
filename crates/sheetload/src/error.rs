//! Error types for the operation engine

use sheetload_csv::CsvError;
use thiserror::Error;

/// Result type alias using [`EngineError`]
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can stop a batch
#[derive(Debug, Error)]
pub enum EngineError {
    /// Structural problem with the batch, raised before any write
    #[error("Configuration error: {0}")]
    Config(String),

    /// The batch file could not be read
    #[error("Failed to read batch config '{path}'")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The batch file is not valid JSON for a batch
    #[error("Invalid batch config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Malformed anchor cell or unusable write extent
    #[error("Invalid reference: {0}")]
    InvalidReference(#[from] sheetload_core::Error),

    /// The data source could not be read
    #[error("Failed to read data source '{path}'")]
    SourceRead {
        path: String,
        #[source]
        source: CsvError,
    },

    /// The data source was read but is not well-formed delimited text
    #[error("Failed to parse data source '{path}'")]
    SourceParse {
        path: String,
        #[source]
        source: CsvError,
    },

    /// A call against the remote spreadsheet failed
    #[error("Remote operation failed")]
    Remote(#[from] RemoteError),
}

impl EngineError {
    /// Classify a loader failure for `path`
    pub fn from_source(path: impl Into<String>, source: CsvError) -> Self {
        let path = path.into();
        if source.is_read_error() {
            EngineError::SourceRead { path, source }
        } else {
            EngineError::SourceParse { path, source }
        }
    }
}

/// A failed call against a [`SpreadsheetHandle`](crate::SpreadsheetHandle)
#[derive(Debug, Error)]
#[error("{call} failed")]
pub struct RemoteError {
    /// What was being attempted (e.g., "clear 'Sheet1'")
    pub call: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl RemoteError {
    /// Wrap a failure from the remote side
    pub fn new(
        call: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            call: call.into(),
            source: source.into(),
        }
    }
}
