//! Google API client: configuration, authentication, and request plumbing.

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{GoogleError, Result};
use crate::spreadsheet::Spreadsheet;

/// Default Sheets API host.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Default Drive API host.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com";

/// Configuration for the Google client.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth 2.0 access token with the spreadsheets and drive scopes.
    pub access_token: String,
    /// Base URL for the Sheets v4 API. Default: [`SHEETS_API_BASE`].
    pub sheets_base_url: String,
    /// Base URL for the Drive v3 API. Default: [`DRIVE_API_BASE`].
    pub drive_base_url: String,
    /// Per-request timeout. Default: 60 seconds.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            sheets_base_url: SHEETS_API_BASE.to_string(),
            drive_base_url: DRIVE_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("sheetload/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GoogleConfig {
    /// Default configuration with the given access token.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Point both APIs at one host (used against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.sheets_base_url = base_url.clone();
        self.drive_base_url = base_url;
        self
    }
}

/// Authenticated client for the Sheets and Drive REST APIs.
///
/// Requests are issued one at a time by callers; no retries are attempted.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    token: String,
    sheets_base: Url,
    drive_base: Url,
}

impl GoogleClient {
    /// Build a client from configuration.
    pub fn new(config: GoogleConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(GoogleError::MissingToken);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            token: config.access_token,
            sheets_base: parse_base(&config.sheets_base_url)?,
            drive_base: parse_base(&config.drive_base_url)?,
        })
    }

    /// Handle to the spreadsheet with the given id.
    pub fn spreadsheet(&self, spreadsheet_id: impl Into<String>) -> Spreadsheet<'_> {
        Spreadsheet::new(self, spreadsheet_id.into())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn sheets_url(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.sheets_base, segments)
    }

    pub(crate) fn drive_url(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.drive_base, segments)
    }

    /// Send a request and decode a JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let bytes = self.send(request).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request, discarding the response body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?;

        tracing::debug!("{} -> {}", url, status);

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(api_error(status.as_u16(), &bytes))
        }
    }
}

fn parse_base(base: &str) -> Result<Url> {
    let url = Url::parse(base).map_err(|_| GoogleError::InvalidBaseUrl(base.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(GoogleError::InvalidBaseUrl(base.to_string()));
    }
    Ok(url)
}

/// Append percent-encoded path segments to a base URL.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GoogleError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Google wraps failures as `{"error": {"code": .., "message": ..}}`.
fn api_error(status: u16, body: &[u8]) -> GoogleError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
    GoogleError::Api { status, message }
}
