//! Error types for the Google client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("No access token configured")]
    MissingToken,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid share target '{0}' (expected email[:reader|commenter|writer])")]
    InvalidShareTarget(String),
}

pub type Result<T> = std::result::Result<T, GoogleError>;
