//! Per-operation outcomes of a batch run

use std::fmt;

use crate::error::{EngineError, Result};

/// A write that went through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The range written, or the cleared sheet when there was nothing to write
    pub range: String,
    pub rows: usize,
    pub columns: usize,
    /// True if the sheet was cleared first
    pub cleared: bool,
}

/// Why an operation was passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No sheet by that name in the spreadsheet
    UnknownSheet,
    /// Operation type this version does not handle
    UnknownOperationType(String),
    /// The data source had no cells to place at the anchor
    EmptyData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownSheet => f.write_str("sheet not found"),
            SkipReason::UnknownOperationType(name) => write!(f, "unknown operation type '{}'", name),
            SkipReason::EmptyData => f.write_str("no data to write"),
        }
    }
}

/// How one operation ended
#[derive(Debug)]
pub enum OutcomeStatus {
    Applied(Applied),
    Skipped(SkipReason),
    /// Fatal; nothing after this operation ran
    Failed(EngineError),
}

/// One entry per attempted operation
#[derive(Debug)]
pub struct OperationOutcome {
    /// 1-based position in the batch
    pub number: usize,
    pub sheet_name: String,
    pub status: OutcomeStatus,
}

impl OperationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, OutcomeStatus::Applied(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, OutcomeStatus::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Result of running a batch
///
/// A fatal failure is always the last outcome; operations after it were never
/// attempted.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<OperationOutcome>,
    /// Number of operations in the batch
    pub total: usize,
}

impl BatchReport {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(total),
            total,
        }
    }

    pub(crate) fn record(&mut self, number: usize, sheet_name: &str, status: OutcomeStatus) {
        self.outcomes.push(OperationOutcome {
            number,
            sheet_name: sheet_name.to_string(),
            status,
        });
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// The operation that aborted the run, if any
    pub fn failure(&self) -> Option<&OperationOutcome> {
        self.outcomes.iter().find(|o| o.is_failed())
    }

    /// Operations never attempted because of an abort
    pub fn not_attempted(&self) -> usize {
        self.total.saturating_sub(self.outcomes.len())
    }

    /// True if no operation failed
    pub fn is_success(&self) -> bool {
        self.failure().is_none()
    }

    /// The report, or the error that aborted the run
    pub fn into_result(mut self) -> Result<Self> {
        match self.outcomes.pop() {
            Some(OperationOutcome {
                status: OutcomeStatus::Failed(err),
                ..
            }) => Err(err),
            Some(outcome) => {
                self.outcomes.push(outcome);
                Ok(self)
            }
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied() -> OutcomeStatus {
        OutcomeStatus::Applied(Applied {
            range: "'S'!A1:B2".into(),
            rows: 2,
            columns: 2,
            cleared: false,
        })
    }

    #[test]
    fn test_counts() {
        let mut report = BatchReport::new(4);
        report.record(1, "S", applied());
        report.record(2, "Missing", OutcomeStatus::Skipped(SkipReason::UnknownSheet));
        report.record(
            3,
            "S",
            OutcomeStatus::Failed(EngineError::Config("boom".into())),
        );

        assert_eq!(report.applied_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failure().map(|o| o.number), Some(3));
        assert_eq!(report.not_attempted(), 1);
        assert!(!report.is_success());
        assert!(matches!(report.into_result(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_into_result_keeps_successful_report() {
        let mut report = BatchReport::new(1);
        report.record(1, "S", applied());
        let report = report.into_result().unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::UnknownSheet.to_string(), "sheet not found");
        assert_eq!(
            SkipReason::UnknownOperationType("Append".into()).to_string(),
            "unknown operation type 'Append'"
        );
    }
}
