//! Cell reference and write range types

use crate::error::{Error, Result};
use crate::table::TabularData;
use std::fmt;
use std::str::FromStr;

/// A single cell reference (e.g., "A1", "B7")
///
/// Both coordinates are 1-based, matching how spreadsheets display them.
/// Column letters form a bijective base-26 numeral: A=1 ... Z=26, AA=27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    /// Column number (1-based, A=1)
    pub column: u32,
    /// Row number (1-based)
    pub row: u32,
}

impl CellRef {
    /// Create a cell reference from 1-based column and row numbers
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if column == 0 || row == 0 {
            return Err(Error::InvalidReference(format!(
                "column and row must be >= 1 (got column {}, row {})",
                column, row
            )));
        }
        Ok(Self { column, row })
    }

    /// The top-left cell of a sheet
    pub const fn origin() -> Self {
        Self { column: 1, row: 1 }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheetload_core::CellRef;
    ///
    /// let cell = CellRef::parse("B7").unwrap();
    /// assert_eq!(cell.column, 2);
    /// assert_eq!(cell.row, 7);
    ///
    /// assert!(CellRef::parse("7B").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty cell reference".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Column letters
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let column = column_to_number(&s[..pos])?;

        // Row digits, and nothing after them
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidReference(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReference(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidReference(format!("row number too large in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidReference(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { column, row })
    }

    /// Column letters for this reference
    pub fn column_letters(&self) -> String {
        letters_for(self.column)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", self.column_letters(), self.row)
    }

    /// Create a range from this cell to another on the given sheet
    pub fn to(&self, end: CellRef, sheet_name: impl Into<String>) -> WriteRange {
        WriteRange::new(sheet_name, *self, end)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert column letters to a 1-based number (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are accepted in either case.
pub fn column_to_number(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidReference("empty column letters".into()));
    }

    let mut value: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                Error::InvalidReference(format!("column '{}' is out of range", letters))
            })?;
    }

    Ok(value)
}

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
pub fn number_to_column(n: u32) -> Result<String> {
    if n < 1 {
        return Err(Error::InvalidReference(format!(
            "column number must be >= 1 (got {})",
            n
        )));
    }
    Ok(letters_for(n))
}

// Bijective base-26: shift down by one before each digit since there is no zero.
fn letters_for(n: u32) -> String {
    let mut result = String::new();
    let mut n = n;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Compute the bottom-right cell of the region `data` covers when written at `start`
///
/// The height is the number of rows and the width is the longest row, so
/// ragged rows never shrink the region.
///
/// # Examples
/// ```
/// use sheetload_core::{compute_end_cell, TabularData};
///
/// let data = TabularData::from_rows(vec![vec!["a", "b"], vec!["c"]]);
/// assert_eq!(compute_end_cell("A1", &data).unwrap().to_string(), "B2");
/// ```
pub fn compute_end_cell(start: &str, data: &TabularData) -> Result<CellRef> {
    let start = CellRef::parse(start)?;
    end_cell_from(start, data)
}

/// Same as [`compute_end_cell`] for an already-parsed start cell
pub fn end_cell_from(start: CellRef, data: &TabularData) -> Result<CellRef> {
    let height = data.row_count();
    let width = data.max_row_len();
    if height == 0 || width == 0 {
        return Err(Error::EmptyData);
    }

    let row = offset(start.row, height)
        .ok_or_else(|| Error::InvalidReference(format!("{} rows from {} overflows", height, start)))?;
    let column = offset(start.column, width).ok_or_else(|| {
        Error::InvalidReference(format!("{} columns from {} overflows", width, start))
    })?;

    Ok(CellRef { column, row })
}

fn offset(base: u32, extent: usize) -> Option<u32> {
    let extent = u32::try_from(extent).ok()?;
    base.checked_add(extent)?.checked_sub(1)
}

/// Quote a sheet name for use in A1 notation (`'My Sheet'`)
///
/// Embedded single quotes are doubled.
pub fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// A rectangular target region on a named sheet (e.g., `'Data'!B2:D10`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WriteRange {
    /// Sheet display name
    pub sheet_name: String,
    /// Start cell (top-left)
    pub start: CellRef,
    /// End cell (bottom-right)
    pub end: CellRef,
}

impl WriteRange {
    /// Create a new write range
    pub fn new(sheet_name: impl Into<String>, start: CellRef, end: CellRef) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            start,
            end,
        }
    }

    /// Build the range `data` occupies when written at `start`
    pub fn for_data(sheet_name: impl Into<String>, start: CellRef, data: &TabularData) -> Result<Self> {
        let end = end_cell_from(start, data)?;
        Ok(Self::new(sheet_name, start, end))
    }

    /// Get the number of rows in the range (at least 1, even if `end` precedes `start`)
    pub fn row_count(&self) -> u32 {
        self.end.row.saturating_sub(self.start.row) + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.column.saturating_sub(self.start.column) + 1
    }

    /// Format as `'Sheet'!A1:B2` (or `'Sheet'!A1` for a single cell)
    pub fn to_a1_string(&self) -> String {
        let sheet = quote_sheet_name(&self.sheet_name);
        if self.start == self.end {
            format!("{}!{}", sheet, self.start)
        } else {
            format!("{}!{}:{}", sheet, self.start, self.end)
        }
    }
}

impl fmt::Display for WriteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}
