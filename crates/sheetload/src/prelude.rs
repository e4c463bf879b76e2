//! Prelude module - common imports for sheetload users
//!
//! ```rust
//! use sheetload::prelude::*;
//! ```

pub use crate::{
    // Batch types
    BatchConfig,
    BatchReport,
    CellRef,
    CsvReadOptions,

    // Data sources
    DataSource,
    Dispatcher,

    // Error types
    EngineError,
    FsSource,
    MemorySource,
    Operation,
    OperationKind,
    OutcomeStatus,
    RawOperation,
    RemoteError,
    Result,
    SheetRegistry,
    SkipReason,

    // Remote seam
    SpreadsheetHandle,
    TabularData,
    WriteRange,
};
