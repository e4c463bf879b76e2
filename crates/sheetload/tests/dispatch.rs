//! End-to-end tests for batch dispatch against an in-memory spreadsheet

use std::sync::Mutex;

use pretty_assertions::assert_eq;
use sheetload::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Registry,
    Clear(String),
    Write(String, Vec<Vec<String>>),
}

/// Records every call; optionally fails writes to one range
struct RecordingHandle {
    registry: SheetRegistry,
    calls: Mutex<Vec<Call>>,
    fail_writes_to: Option<String>,
}

impl RecordingHandle {
    fn new(sheets: &[(&str, i64)]) -> Self {
        Self {
            registry: sheets.iter().map(|(name, id)| (*name, *id)).collect(),
            calls: Mutex::new(Vec::new()),
            fail_writes_to: None,
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Write(..) | Call::Clear(_)))
            .collect()
    }
}

impl SpreadsheetHandle for RecordingHandle {
    async fn sheet_registry(&self) -> std::result::Result<SheetRegistry, RemoteError> {
        self.calls.lock().unwrap().push(Call::Registry);
        Ok(self.registry.clone())
    }

    async fn clear_range(&self, range: &str) -> std::result::Result<(), RemoteError> {
        self.calls.lock().unwrap().push(Call::Clear(range.to_string()));
        Ok(())
    }

    async fn write_range(
        &self,
        range: &str,
        data: &TabularData,
    ) -> std::result::Result<(), RemoteError> {
        if self.fail_writes_to.as_deref() == Some(range) {
            return Err(RemoteError::new(format!("write {}", range), "HTTP 500: backend error"));
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Write(range.to_string(), data.rows().to_vec()));
        Ok(())
    }
}

fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn ops(raw: Vec<RawOperation>) -> Vec<Operation> {
    sheetload::validate(&raw).unwrap()
}

#[tokio::test]
async fn test_unknown_sheet_skipped_then_entire_sheet_replaced() {
    let handle = RecordingHandle::new(&[("Sheet1", 0)]);
    let source = MemorySource::new().with_file("d.csv", "a,b\nc,d\n");
    let operations = ops(vec![
        RawOperation::replace_entire_sheet("Missing", "d.csv"),
        RawOperation::replace_entire_sheet("Sheet1", "d.csv"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert_eq!(
        handle.calls(),
        vec![
            Call::Registry,
            Call::Clear("'Sheet1'".into()),
            Call::Write("'Sheet1'!A1:B2".into(), rows(&[&["a", "b"], &["c", "d"]])),
        ]
    );
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.applied_count(), 1);
    assert!(matches!(
        report.outcomes[0].status,
        OutcomeStatus::Skipped(SkipReason::UnknownSheet)
    ));
    assert!(report.is_success());
}

#[tokio::test]
async fn test_registry_fetched_once() {
    let handle = RecordingHandle::new(&[("A", 1), ("B", 2)]);
    let source = MemorySource::new().with_file("x.csv", "1\n");
    let operations = ops(vec![
        RawOperation::replace_entire_sheet("A", "x.csv"),
        RawOperation::replace_at_cell("B", "x.csv", "C3"),
        RawOperation::replace_at_cell("A", "x.csv", "D4"),
    ]);

    sheetload::run(&handle, &source, &operations).await.unwrap();

    let registry_calls = handle
        .calls()
        .into_iter()
        .filter(|c| *c == Call::Registry)
        .count();
    assert_eq!(registry_calls, 1);
}

#[tokio::test]
async fn test_operations_applied_in_declared_order() {
    let handle = RecordingHandle::new(&[("First", 1), ("Second", 2)]);
    let source = MemorySource::new()
        .with_file("one.csv", "1\n")
        .with_file("two.csv", "2\n");
    let operations = ops(vec![
        RawOperation::replace_at_cell("Second", "two.csv", "B2"),
        RawOperation::replace_at_cell("First", "one.csv", "A1"),
    ]);

    sheetload::run(&handle, &source, &operations).await.unwrap();

    assert_eq!(
        handle.writes(),
        vec![
            Call::Write("'Second'!B2".into(), rows(&[&["2"]])),
            Call::Write("'First'!A1".into(), rows(&[&["1"]])),
        ]
    );
}

#[tokio::test]
async fn test_replace_at_cell_covers_widest_row() {
    let handle = RecordingHandle::new(&[("Data", 7)]);
    let source = MemorySource::new().with_file("r.csv", "a,b,c\nd\ne,f\n");
    let operations = ops(vec![RawOperation::replace_at_cell("Data", "r.csv", "Y10")]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    // Short rows go out as-is; no padding is added
    assert_eq!(
        handle.writes(),
        vec![Call::Write(
            "'Data'!Y10:AA12".into(),
            rows(&[&["a", "b", "c"], &["d"], &["e", "f"]])
        )]
    );
    match &report.outcomes[0].status {
        OutcomeStatus::Applied(applied) => {
            assert_eq!(applied.rows, 3);
            assert_eq!(applied.columns, 3);
            assert!(!applied.cleared);
        }
        other => panic!("expected applied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_read_failure_aborts_remaining_operations() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new()
        .with_file("one.csv", "1\n")
        .with_file("three.csv", "3\n");
    let operations = ops(vec![
        RawOperation::replace_at_cell("S", "one.csv", "A1"),
        RawOperation::replace_at_cell("S", "two.csv", "A2"),
        RawOperation::replace_at_cell("S", "three.csv", "A3"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert_eq!(
        handle.writes(),
        vec![Call::Write("'S'!A1".into(), rows(&[&["1"]]))]
    );
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.not_attempted(), 1);

    let failure = report.failure().unwrap();
    assert_eq!(failure.number, 2);
    match &failure.status {
        OutcomeStatus::Failed(EngineError::SourceRead { path, source }) => {
            assert_eq!(path, "two.csv");
            assert!(source.is_not_found());
        }
        other => panic!("expected source read failure, got {other:?}"),
    }

    assert!(matches!(
        report.into_result(),
        Err(EngineError::SourceRead { .. })
    ));
}

#[tokio::test]
async fn test_parse_failure_is_fatal() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("bad.csv", "a,\"unclosed\n");
    let operations = ops(vec![RawOperation::replace_entire_sheet("S", "bad.csv")]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(handle.writes().is_empty());
    assert!(matches!(
        report.failure().map(|o| &o.status),
        Some(OutcomeStatus::Failed(EngineError::SourceParse { .. }))
    ));
}

#[tokio::test]
async fn test_unknown_sheet_skips_without_loading() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("ok.csv", "1\n");
    let operations = ops(vec![
        RawOperation::replace_entire_sheet("Gone", "does-not-exist.csv"),
        RawOperation::replace_entire_sheet("S", "ok.csv"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(report.is_success());
    assert_eq!(report.applied_count(), 1);
}

#[tokio::test]
async fn test_unknown_operation_type_skipped() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("d.csv", "1\n");
    let operations = ops(vec![
        RawOperation {
            sheet_name: Some("S".into()),
            data_path: Some("d.csv".into()),
            operation_type: Some("AppendRows".into()),
            cell_id: None,
        },
        RawOperation::replace_at_cell("S", "d.csv", "B2"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert_eq!(
        handle.writes(),
        vec![Call::Write("'S'!B2".into(), rows(&[&["1"]]))]
    );
    assert!(matches!(
        &report.outcomes[0].status,
        OutcomeStatus::Skipped(SkipReason::UnknownOperationType(name)) if name == "AppendRows"
    ));
}

#[tokio::test]
async fn test_invalid_anchor_aborts() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("d.csv", "1\n");
    let operations = ops(vec![
        RawOperation::replace_at_cell("S", "d.csv", "1A"),
        RawOperation::replace_entire_sheet("S", "d.csv"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(handle.writes().is_empty());
    assert_eq!(report.not_attempted(), 1);
    assert!(matches!(
        report.failure().map(|o| &o.status),
        Some(OutcomeStatus::Failed(EngineError::InvalidReference(_)))
    ));
}

#[tokio::test]
async fn test_remote_failure_aborts() {
    let mut handle = RecordingHandle::new(&[("S", 0), ("T", 1)]);
    handle.fail_writes_to = Some("'S'!A1".into());
    let source = MemorySource::new().with_file("d.csv", "1\n");
    let operations = ops(vec![
        RawOperation::replace_entire_sheet("S", "d.csv"),
        RawOperation::replace_entire_sheet("T", "d.csv"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    // The clear went out before the write failed
    assert_eq!(handle.writes(), vec![Call::Clear("'S'".into())]);
    let err = report.into_result().unwrap_err();
    assert!(matches!(err, EngineError::Remote(_)));
    let cause = std::error::Error::source(&err).unwrap().to_string();
    assert_eq!(cause, "write 'S'!A1 failed");
}

#[tokio::test]
async fn test_empty_data() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("empty.csv", "\n\n");
    let operations = ops(vec![
        RawOperation::replace_entire_sheet("S", "empty.csv"),
        RawOperation::replace_at_cell("S", "empty.csv", "C3"),
    ]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    // The sheet is still cleared; nothing is written anywhere
    assert_eq!(handle.writes(), vec![Call::Clear("'S'".into())]);
    assert!(report.outcomes[0].is_applied());
    assert!(matches!(
        report.outcomes[1].status,
        OutcomeStatus::Skipped(SkipReason::EmptyData)
    ));
}

#[tokio::test]
async fn test_fs_source_relative_to_batch_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.csv"), "x,y\n").unwrap();

    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = FsSource::with_base_dir(dir.path());
    let operations = ops(vec![RawOperation::replace_at_cell("S", "data.csv", "B2")]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(report.is_success());
    assert_eq!(
        handle.writes(),
        vec![Call::Write("'S'!B2:C2".into(), rows(&[&["x", "y"]]))]
    );
}

#[tokio::test]
async fn test_custom_delimiter() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("d.tsv", "a\tb\n");
    let operations = ops(vec![RawOperation::replace_at_cell("S", "d.tsv", "A1")]);

    Dispatcher::new(&handle, &source)
        .with_csv_options(CsvReadOptions::tsv())
        .run(&operations)
        .await
        .unwrap();

    assert_eq!(
        handle.writes(),
        vec![Call::Write("'S'!A1:B1".into(), rows(&[&["a", "b"]]))]
    );
}

#[tokio::test]
async fn test_quoted_empty_line_keeps_its_row() {
    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = MemorySource::new().with_file("col.csv", "\"a\"\n\"\"\n\"c\"\n");
    let operations = ops(vec![RawOperation::replace_at_cell("S", "col.csv", "A1")]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(report.is_success());
    assert_eq!(
        handle.writes(),
        vec![Call::Write("'S'!A1:A3".into(), rows(&[&["a"], &[""], &["c"]]))]
    );
}

#[tokio::test]
async fn test_invalid_utf8_is_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.csv"), b"a,\xff\xfe\n").unwrap();

    let handle = RecordingHandle::new(&[("S", 0)]);
    let source = FsSource::with_base_dir(dir.path());
    let operations = ops(vec![RawOperation::replace_entire_sheet("S", "bad.csv")]);

    let report = sheetload::run(&handle, &source, &operations).await.unwrap();

    assert!(handle.writes().is_empty());
    match report.failure().map(|o| &o.status) {
        Some(OutcomeStatus::Failed(EngineError::SourceParse { path, .. })) => {
            assert_eq!(path, "bad.csv");
        }
        other => panic!("expected source parse failure, got {other:?}"),
    }
}

