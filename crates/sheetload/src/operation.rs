//! Declared operations and batch validation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sheetload_core::quote_sheet_name;

use crate::error::{EngineError, Result};

/// The known write modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// Clear the whole sheet, then write from `A1`
    ReplaceEntireSheet,
    /// Overwrite the rectangle anchored at a given cell
    ReplaceAtCell,
}

impl OperationType {
    /// Name as it appears in a batch file
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::ReplaceEntireSheet => "ReplaceEntireSheet",
            OperationType::ReplaceAtCell => "ReplaceAtCell",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ReplaceEntireSheet" => Ok(OperationType::ReplaceEntireSheet),
            "ReplaceAtCell" => Ok(OperationType::ReplaceAtCell),
            other => Err(other.to_string()),
        }
    }
}

/// An operation as declared by the caller, before validation
///
/// Every field is optional here; [`validate`] decides what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<String>,
}

impl RawOperation {
    /// A whole-sheet replace
    pub fn replace_entire_sheet(sheet_name: &str, data_path: &str) -> Self {
        Self {
            sheet_name: Some(sheet_name.into()),
            data_path: Some(data_path.into()),
            operation_type: Some(OperationType::ReplaceEntireSheet.to_string()),
            cell_id: None,
        }
    }

    /// An anchored replace at `cell_id`
    pub fn replace_at_cell(sheet_name: &str, data_path: &str, cell_id: &str) -> Self {
        Self {
            sheet_name: Some(sheet_name.into()),
            data_path: Some(data_path.into()),
            operation_type: Some(OperationType::ReplaceAtCell.to_string()),
            cell_id: Some(cell_id.into()),
        }
    }
}

/// What a validated operation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    ReplaceEntireSheet,
    ReplaceAtCell { cell_id: String },
    /// A type this version does not know; skipped at dispatch
    Unknown(String),
}

impl OperationKind {
    /// Name as it appears in a batch file
    pub fn type_name(&self) -> &str {
        match self {
            OperationKind::ReplaceEntireSheet => OperationType::ReplaceEntireSheet.as_str(),
            OperationKind::ReplaceAtCell { .. } => OperationType::ReplaceAtCell.as_str(),
            OperationKind::Unknown(name) => name,
        }
    }
}

/// A validated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub sheet_name: String,
    pub data_path: String,
    pub kind: OperationKind,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sheet = quote_sheet_name(&self.sheet_name);
        match &self.kind {
            OperationKind::ReplaceEntireSheet => {
                write!(f, "ReplaceEntireSheet {} <- {}", sheet, self.data_path)
            }
            OperationKind::ReplaceAtCell { cell_id } => {
                write!(f, "ReplaceAtCell {}!{} <- {}", sheet, cell_id, self.data_path)
            }
            OperationKind::Unknown(name) => {
                write!(f, "{} (unknown) {} <- {}", name, sheet, self.data_path)
            }
        }
    }
}

/// Check a whole batch before anything is written
///
/// Fails on the first structural problem, in declared order. Files and
/// sheets are not checked here; they are resolved against live state at
/// dispatch. Empty strings count as absent.
pub fn validate(raw: &[RawOperation]) -> Result<Vec<Operation>> {
    if raw.is_empty() {
        return Err(EngineError::Config("empty batch".into()));
    }

    raw.iter()
        .enumerate()
        .map(|(i, op)| validate_one(i + 1, op))
        .collect()
}

fn validate_one(number: usize, op: &RawOperation) -> Result<Operation> {
    let sheet_name = required(&op.sheet_name, "sheetName", number)?;
    let data_path = required(&op.data_path, "dataPath", number)?;
    let operation_type = required(&op.operation_type, "operationType", number)?;

    let kind = match operation_type.parse::<OperationType>() {
        Ok(OperationType::ReplaceEntireSheet) => OperationKind::ReplaceEntireSheet,
        Ok(OperationType::ReplaceAtCell) => {
            let cell_id = present(&op.cell_id).ok_or_else(|| {
                EngineError::Config(format!("missing cellId, operation #{}", number))
            })?;
            OperationKind::ReplaceAtCell {
                cell_id: cell_id.to_string(),
            }
        }
        Err(name) => OperationKind::Unknown(name),
    };

    Ok(Operation {
        sheet_name: sheet_name.to_string(),
        data_path: data_path.to_string(),
        kind,
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn required<'a>(field: &'a Option<String>, name: &str, number: usize) -> Result<&'a str> {
    present(field).ok_or_else(|| {
        EngineError::Config(format!("missing field {}, operation #{}", name, number))
    })
}
