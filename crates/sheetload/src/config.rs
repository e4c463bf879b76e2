//! Batch configuration file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::operation::{validate, Operation, RawOperation};

/// A batch of operations as supplied by the caller
///
/// ```json
/// {
///   "operations": [
///     { "sheetName": "Data", "dataPath": "data.csv", "operationType": "ReplaceEntireSheet" },
///     { "sheetName": "Summary", "dataPath": "totals.csv", "operationType": "ReplaceAtCell", "cellId": "B4" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub operations: Vec<RawOperation>,
}

impl BatchConfig {
    /// Parse a batch from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a batch file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate every operation in the batch
    pub fn validate(&self) -> Result<Vec<Operation>> {
        validate(&self.operations)
    }
}
