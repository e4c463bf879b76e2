//! CSV reader

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use crate::source::DataSource;
use sheetload_core::TabularData;

/// Delimited text reader
pub struct CsvReader;

impl CsvReader {
    /// Load the content at `path` from `source`
    pub fn load<S: DataSource + ?Sized>(
        source: &S,
        path: &str,
        options: &CsvReadOptions,
    ) -> CsvResult<TabularData> {
        let text = source.read_to_string(path)?;
        let data = Self::read_str(&text, options)?;
        tracing::debug!(
            "Loaded {} rows ({} columns max) from {}",
            data.row_count(),
            data.max_row_len(),
            path
        );
        Ok(data)
    }

    /// Read a CSV file from the local file system
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<TabularData> {
        let text = std::fs::read_to_string(path)?;
        Self::read_str(&text, options)
    }

    /// Parse delimited text
    ///
    /// Rows keep their own length; no header is consumed.
    pub fn read_str(text: &str, options: &CsvReadOptions) -> CsvResult<TabularData> {
        check_quotes(text, options.delimiter, options.quote)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut data = TabularData::default();

        for result in csv_reader.records() {
            let record = result?;

            if options.skip_blank_lines && is_blank(&record, text) {
                continue;
            }

            data.push_row(record.iter().map(str::to_owned).collect());
        }

        Ok(data)
    }
}

/// A line holding only whitespace
///
/// Decided from the raw line so that a quoted empty field (`""`) still counts
/// as a record with one empty cell.
fn is_blank(record: &csv::StringRecord, text: &str) -> bool {
    if record.len() != 1 || !record[0].trim().is_empty() {
        return false;
    }
    match record.position() {
        Some(pos) => {
            let start = usize::try_from(pos.byte()).unwrap_or(usize::MAX);
            text.as_bytes()
                .get(start..)
                .unwrap_or_default()
                .iter()
                .take_while(|&&b| b != b'\n')
                .all(u8::is_ascii_whitespace)
        }
        None => true,
    }
}

/// Reject a quoted field that is never closed
///
/// The csv crate reads an unterminated quote to end of input without
/// complaint, which would silently merge every following line into one cell.
fn check_quotes(text: &str, delimiter: u8, quote: u8) -> CsvResult<()> {
    let bytes = text.as_bytes();
    let mut line = 1;
    let mut column = 0;
    let mut at_field_start = true;
    let mut open: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        column += 1;

        if open.is_some() {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    // Escaped quote
                    i += 2;
                    column += 1;
                    continue;
                }
                open = None;
            }
        } else if b == quote && at_field_start {
            open = Some((line, column));
        }

        at_field_start = open.is_none() && (b == delimiter || b == b'\n' || b == b'\r');

        if b == b'\n' {
            line += 1;
            column = 0;
        }
        i += 1;
    }

    match open {
        Some((line, column)) => Err(CsvError::Parse {
            line,
            column,
            message: "unterminated quoted field".into(),
        }),
        None => Ok(()),
    }
}
