//! # sheetload-csv
//!
//! Loads delimited text into [`TabularData`](sheetload_core::TabularData).
//!
//! Every cell stays a string; no header row is consumed and no types are
//! inferred. Content is fetched through a [`DataSource`], so callers can load
//! from the local file system ([`FsSource`]) or from memory ([`MemorySource`]).

mod error;
mod options;
mod reader;
mod source;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
pub use source::{DataSource, FsSource, MemorySource};
