//! Cell addressing
//!
//! This module contains:
//! - [`CellRef`] - A cell's location (e.g., "B7")
//! - [`WriteRange`] - A rectangular region on a named sheet (e.g., "'Data'!A1:C4")
//! - Column letter conversion in both directions

mod address;

pub use address::{
    column_to_number, compute_end_cell, end_cell_from, number_to_column, quote_sheet_name,
    CellRef, WriteRange,
};
