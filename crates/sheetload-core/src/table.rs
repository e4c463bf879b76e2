//! Tabular data: rows of opaque string cells

/// An ordered sequence of rows, each an ordered sequence of string cells
///
/// Rows may have different lengths. Cells are passed through verbatim, so
/// formula-like content such as `=SUM(A1:A3)` is kept as text here and only
/// interpreted by the remote spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TabularData {
    rows: Vec<Vec<String>>,
}

impl TabularData {
    /// Create from owned rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Create from anything that yields rows of string-like cells
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (0 when there are no rows)
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// True if there is nothing to write
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// True if rows differ in length
    pub fn is_ragged(&self) -> bool {
        let width = self.max_row_len();
        self.rows.iter().any(|row| row.len() != width)
    }

    /// Consume into the underlying rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for TabularData {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
