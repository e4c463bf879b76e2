//! Applying a validated batch to a spreadsheet

use sheetload_csv::{CsvReadOptions, CsvReader, DataSource};

use crate::error::{EngineError, Result};
use crate::handle::{SheetRegistry, SpreadsheetHandle};
use crate::operation::{Operation, OperationKind};
use crate::report::{BatchReport, OutcomeStatus, SkipReason};
use crate::strategy;

/// Runs operations one at a time, in declared order
///
/// The sheet registry is fetched once per run. Unknown sheets and unknown
/// operation types are skipped with a warning; a failure to load data, a bad
/// anchor cell, or a remote error aborts the rest of the batch.
pub struct Dispatcher<'a, H, S: ?Sized> {
    handle: &'a H,
    source: &'a S,
    csv_options: CsvReadOptions,
}

impl<'a, H: SpreadsheetHandle, S: DataSource + ?Sized> Dispatcher<'a, H, S> {
    pub fn new(handle: &'a H, source: &'a S) -> Self {
        Self {
            handle,
            source,
            csv_options: CsvReadOptions::default(),
        }
    }

    /// Use different delimiter/quote settings for every data source
    pub fn with_csv_options(mut self, options: CsvReadOptions) -> Self {
        self.csv_options = options;
        self
    }

    /// Apply `operations` and report what happened to each
    ///
    /// Returns `Err` only if the sheet registry cannot be fetched, in which
    /// case nothing was attempted. Later failures are recorded as the last
    /// outcome of the report.
    pub async fn run(&self, operations: &[Operation]) -> Result<BatchReport> {
        let registry = self.handle.sheet_registry().await?;
        tracing::debug!("Sheet registry has {} sheets", registry.len());

        let mut report = BatchReport::new(operations.len());

        for (i, op) in operations.iter().enumerate() {
            let number = i + 1;
            let status = match self.apply(&registry, op).await {
                Ok(status) => status,
                Err(err) => OutcomeStatus::Failed(err),
            };

            match &status {
                OutcomeStatus::Applied(applied) => tracing::info!(
                    "Operation #{} applied: {} rows to {}",
                    number,
                    applied.rows,
                    applied.range
                ),
                OutcomeStatus::Skipped(reason) => tracing::warn!(
                    "Operation #{} on '{}' skipped: {}",
                    number,
                    op.sheet_name,
                    reason
                ),
                OutcomeStatus::Failed(err) => tracing::error!(
                    "Operation #{} on '{}' failed: {}",
                    number,
                    op.sheet_name,
                    err
                ),
            }

            let failed = matches!(status, OutcomeStatus::Failed(_));
            report.record(number, &op.sheet_name, status);
            if failed {
                break;
            }
        }

        Ok(report)
    }

    async fn apply(&self, registry: &SheetRegistry, op: &Operation) -> Result<OutcomeStatus> {
        if !registry.contains(&op.sheet_name) {
            return Ok(OutcomeStatus::Skipped(SkipReason::UnknownSheet));
        }

        let data = CsvReader::load(self.source, &op.data_path, &self.csv_options)
            .map_err(|e| EngineError::from_source(&op.data_path, e))?;

        match &op.kind {
            OperationKind::ReplaceEntireSheet => {
                strategy::replace_entire_sheet(self.handle, &op.sheet_name, &data).await
            }
            OperationKind::ReplaceAtCell { cell_id } => {
                strategy::replace_at_cell(self.handle, &op.sheet_name, cell_id, &data).await
            }
            OperationKind::Unknown(name) => Ok(OutcomeStatus::Skipped(
                SkipReason::UnknownOperationType(name.clone()),
            )),
        }
    }
}

/// Apply `operations` with default CSV options
pub async fn run<H, S>(handle: &H, source: &S, operations: &[Operation]) -> Result<BatchReport>
where
    H: SpreadsheetHandle,
    S: DataSource + ?Sized,
{
    Dispatcher::new(handle, source).run(operations).await
}
