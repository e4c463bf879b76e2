//! The two write strategies
//!
//! Each strategy turns a sheet name and its data into range calls against a
//! [`SpreadsheetHandle`]. Neither is atomic: a whole-sheet replace that fails
//! between its clear and its write leaves the sheet empty.

use sheetload_core::{quote_sheet_name, CellRef, TabularData, WriteRange};

use crate::error::{EngineError, Result};
use crate::handle::SpreadsheetHandle;
use crate::report::{Applied, OutcomeStatus, SkipReason};

/// Clear the whole sheet, then write `data` from `A1`
///
/// With no data the sheet is still cleared.
pub async fn replace_entire_sheet<H: SpreadsheetHandle>(
    handle: &H,
    sheet_name: &str,
    data: &TabularData,
) -> Result<OutcomeStatus> {
    let whole_sheet = quote_sheet_name(sheet_name);
    handle.clear_range(&whole_sheet).await?;

    if data.is_empty() {
        return Ok(OutcomeStatus::Applied(Applied {
            range: whole_sheet,
            rows: 0,
            columns: 0,
            cleared: true,
        }));
    }

    let range = WriteRange::for_data(sheet_name, CellRef::origin(), data)?;
    write(handle, &range, data, true).await
}

/// Overwrite the rectangle anchored at `cell_id`
///
/// Cells outside the rectangle are untouched. Short rows are sent as-is;
/// what the remote does with the cells they leave out is up to it.
pub async fn replace_at_cell<H: SpreadsheetHandle>(
    handle: &H,
    sheet_name: &str,
    cell_id: &str,
    data: &TabularData,
) -> Result<OutcomeStatus> {
    let start = CellRef::parse(cell_id)?;
    if data.is_empty() {
        return Ok(OutcomeStatus::Skipped(SkipReason::EmptyData));
    }

    let range = WriteRange::for_data(sheet_name, start, data)?;
    write(handle, &range, data, false).await
}

async fn write<H: SpreadsheetHandle>(
    handle: &H,
    range: &WriteRange,
    data: &TabularData,
    cleared: bool,
) -> Result<OutcomeStatus> {
    let a1 = range.to_a1_string();
    handle
        .write_range(&a1, data)
        .await
        .map_err(EngineError::Remote)?;

    Ok(OutcomeStatus::Applied(Applied {
        range: a1,
        rows: data.row_count(),
        columns: data.max_row_len(),
        cleared,
    }))
}
