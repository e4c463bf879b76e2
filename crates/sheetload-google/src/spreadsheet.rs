//! Spreadsheet handle backed by the Sheets v4 values API.

use serde::{Deserialize, Serialize};
use sheetload::{RemoteError, SheetRegistry, SpreadsheetHandle};
use sheetload_core::TabularData;

use crate::client::GoogleClient;
use crate::error::Result;

/// A handle to one spreadsheet.
pub struct Spreadsheet<'a> {
    client: &'a GoogleClient,
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    // Zero-valued ids may be left out of the response
    #[serde(default)]
    sheet_id: i64,
    title: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'d> {
    range: &'d str,
    major_dimension: &'static str,
    values: &'d TabularData,
}

impl<'a> Spreadsheet<'a> {
    pub(crate) fn new(client: &'a GoogleClient, id: String) -> Self {
        Self { client, id }
    }

    /// The spreadsheet id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch sheet titles and ids.
    pub async fn fetch_sheets(&self) -> Result<SheetRegistry> {
        let url = self.client.sheets_url(&["v4", "spreadsheets", self.id.as_str()])?;
        let request = self
            .client
            .http()
            .get(url)
            .query(&[("fields", "sheets.properties(sheetId,title)")]);

        let meta: SpreadsheetMeta = self.client.send_json(request).await?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|s| (s.properties.title, s.properties.sheet_id))
            .collect())
    }

    /// Clear all values in an A1 range.
    pub async fn clear(&self, range: &str) -> Result<()> {
        let target = format!("{range}:clear");
        let url = self
            .client
            .sheets_url(&["v4", "spreadsheets", self.id.as_str(), "values", target.as_str()])?;
        let request = self.client.http().post(url).json(&serde_json::json!({}));

        tracing::debug!("Clearing {} in {}", range, self.id);
        self.client.send_empty(request).await
    }

    /// Write rows into an A1 range, interpreting values as if typed by a user.
    ///
    /// Rows are sent exactly as given. The Sheets API leaves cells that a
    /// short row does not reach unchanged.
    pub async fn update(&self, range: &str, data: &TabularData) -> Result<()> {
        let url = self
            .client
            .sheets_url(&["v4", "spreadsheets", self.id.as_str(), "values", range])?;
        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values: data,
        };
        let request = self
            .client
            .http()
            .put(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body);

        tracing::debug!("Writing {} rows to {} in {}", data.row_count(), range, self.id);
        self.client.send_empty(request).await
    }
}

impl SpreadsheetHandle for Spreadsheet<'_> {
    async fn sheet_registry(&self) -> std::result::Result<SheetRegistry, RemoteError> {
        self.fetch_sheets()
            .await
            .map_err(|e| RemoteError::new(format!("fetch sheets of {}", self.id), e))
    }

    async fn clear_range(&self, range: &str) -> std::result::Result<(), RemoteError> {
        self.clear(range)
            .await
            .map_err(|e| RemoteError::new(format!("clear {range}"), e))
    }

    async fn write_range(
        &self,
        range: &str,
        data: &TabularData,
    ) -> std::result::Result<(), RemoteError> {
        self.update(range, data)
            .await
            .map_err(|e| RemoteError::new(format!("write {range}"), e))
    }
}
