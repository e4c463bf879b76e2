//! # sheetload-core
//!
//! Core data types for sheetload.
//!
//! - [`CellRef`] and [`WriteRange`] - Cell addressing and write regions
//! - [`column_to_number`] / [`number_to_column`] - Bijective base-26 column letters
//! - [`compute_end_cell`] - The extent of a block of data written at an anchor cell
//! - [`TabularData`] - Rows of opaque string cells, possibly ragged
//!
//! ## Example
//!
//! ```rust
//! use sheetload_core::{CellRef, TabularData, WriteRange};
//!
//! let data = TabularData::from_rows(vec![vec!["name", "qty"], vec!["bolts", "40"]]);
//! let range = WriteRange::for_data("Stock", CellRef::parse("B2").unwrap(), &data).unwrap();
//! assert_eq!(range.to_string(), "'Stock'!B2:C3");
//! ```

pub mod cell;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use cell::{
    column_to_number, compute_end_cell, end_cell_from, number_to_column, quote_sheet_name,
    CellRef, WriteRange,
};
pub use error::{Error, Result};
pub use table::TabularData;
