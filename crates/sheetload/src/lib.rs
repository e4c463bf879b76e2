//! # sheetload
//!
//! Applies bulk CSV load operations to a remote spreadsheet.
//!
//! A batch is a list of operations, each naming a target sheet, a data source,
//! and a write mode:
//!
//! - `ReplaceEntireSheet` clears the sheet and writes the data from `A1`
//! - `ReplaceAtCell` writes the data as a rectangle anchored at a given cell
//!
//! The whole batch is validated before anything is written. Operations then run
//! strictly in declared order against a [`SpreadsheetHandle`], and each one ends
//! up in the returned [`BatchReport`] as applied, skipped, or failed.
//!
//! ## Example
//!
//! ```rust
//! use sheetload::prelude::*;
//!
//! let config = BatchConfig::from_json_str(r#"{
//!     "operations": [
//!         { "sheetName": "Data", "dataPath": "data.csv", "operationType": "ReplaceEntireSheet" },
//!         { "sheetName": "Summary", "dataPath": "totals.csv", "operationType": "ReplaceAtCell", "cellId": "B4" }
//!     ]
//! }"#).unwrap();
//!
//! let operations = config.validate().unwrap();
//! assert_eq!(operations.len(), 2);
//!
//! // With a handle to the remote spreadsheet:
//! // let report = sheetload::run(&handle, &FsSource::new(), &operations).await?;
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod operation;
pub mod prelude;
pub mod report;
pub mod strategy;

pub use config::BatchConfig;
pub use dispatch::{run, Dispatcher};
pub use error::{EngineError, RemoteError, Result};
pub use handle::{SheetRegistry, SpreadsheetHandle};
pub use operation::{validate, Operation, OperationKind, OperationType, RawOperation};
pub use report::{Applied, BatchReport, OperationOutcome, OutcomeStatus, SkipReason};

// Re-export core types
pub use sheetload_core::{
    column_to_number, compute_end_cell, number_to_column, CellRef, TabularData, WriteRange,
};

// Re-export loader types
pub use sheetload_csv::{CsvError, CsvReadOptions, CsvReader, DataSource, FsSource, MemorySource};
