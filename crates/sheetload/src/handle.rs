//! The remote spreadsheet, as the engine sees it

use std::collections::HashMap;

use sheetload_core::TabularData;

use crate::error::RemoteError;

/// Sheet display name to sheet id, snapshotted once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRegistry {
    sheets: HashMap<String, i64>,
}

impl SheetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sheet
    pub fn insert(&mut self, name: impl Into<String>, id: i64) {
        self.sheets.insert(name.into(), id);
    }

    /// Id of the sheet named `name`
    pub fn get(&self, name: &str) -> Option<i64> {
        self.sheets.get(name).copied()
    }

    /// True if a sheet named `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Sheet names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sheets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for SheetRegistry {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            sheets: iter.into_iter().map(|(name, id)| (name.into(), id)).collect(),
        }
    }
}

/// Operations the engine needs from a remote spreadsheet
///
/// Ranges are A1 notation, sheet-qualified (e.g., `'Data'!B2:D9`, or
/// `'Data'` for the whole sheet). Values are written as if typed by a user,
/// so formula-like and date-like strings are interpreted by the spreadsheet.
#[allow(async_fn_in_trait)]
pub trait SpreadsheetHandle {
    /// Snapshot the current sheet names and ids
    async fn sheet_registry(&self) -> Result<SheetRegistry, RemoteError>;

    /// Clear every value in `range`
    async fn clear_range(&self, range: &str) -> Result<(), RemoteError>;

    /// Write `data` into `range`, row by row
    async fn write_range(&self, range: &str, data: &TabularData) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let registry: SheetRegistry = vec![("Sheet1", 0), ("Data", 1_234_567)].into_iter().collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Data"), Some(1_234_567));
        assert!(registry.contains("Sheet1"));
        assert!(!registry.contains("sheet1"));
        assert_eq!(registry.names(), vec!["Data", "Sheet1"]);
    }
}
