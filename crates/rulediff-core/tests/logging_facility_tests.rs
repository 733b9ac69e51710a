#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::document;
use rulediff_core::diagnostics::TracingSink;
use rulediff_core::document::load_document;
use rulediff_core::errors::RuleDiffError;
use rulediff_core::logging_facility::test_capture::init_test_capture;
use rulediff_core::{collect_alerts, compute_diff, log_op_end, log_op_error, log_op_start};
use rulediff_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use std::path::{Path, PathBuf};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, path = "rules.yaml");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert!(events[0].is(op_name, EVENT_START));
    assert_eq!(events[0].level, Level::INFO);
    assert_eq!(events[0].field("path"), Some("rules.yaml"));
    assert!(events[0]
        .component()
        .unwrap()
        .ends_with("logging_facility_tests"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, rule_count = 3usize);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert!(events[0].is(op_name, EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
    assert_eq!(events[0].field("rule_count"), Some("3"));
}

#[test]
fn test_log_op_error_includes_code_and_text() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RuleDiffError::MalformedDocument {
        path: PathBuf::from("both.yaml"),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert!(events[0].is(op_name, EVENT_END_ERROR));
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].field("err_code"), Some("ERR_MALFORMED_DOCUMENT"));
    assert!(events[0].field("error").unwrap().contains("both.yaml"));
}

#[test]
fn test_failed_load_closes_with_end_error() {
    let capture = init_test_capture();
    let missing = Path::new("/nonexistent/rulediff/logging-unique.yaml");

    assert!(load_document(missing).is_err());

    let events: Vec<_> = capture
        .events_for("load_document")
        .into_iter()
        .filter(|e| e.field("path") == Some("/nonexistent/rulediff/logging-unique.yaml"))
        .collect();
    assert_eq!(events.len(), 1);
    assert!(capture
        .events_for("load_document")
        .iter()
        .any(|e| e.is("load_document", EVENT_END_ERROR) && e.field("err_code") == Some("ERR_IO")));
}

#[test]
fn test_tracing_sink_emits_warning() {
    let capture = init_test_capture();
    let alert = "TracingSinkUniqueAlert";

    collect_alerts(&document(&[(alert, "a > 1"), (alert, "a > 2")]), &TracingSink);

    let warnings = capture.warnings_for_alert(alert);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, Level::WARN);
    assert_eq!(warnings[0].op(), Some("collect_alerts"));
    assert_eq!(warnings[0].field("group"), Some("test"));
    assert!(warnings[0]
        .message()
        .unwrap()
        .contains("multiple entries found"));
}

#[test]
fn test_compute_diff_brackets_with_start_and_end() {
    let capture = init_test_capture();

    compute_diff(&Default::default(), &Default::default());

    capture.assert_event_exists("compute_diff", EVENT_START);
    capture.assert_event_exists("compute_diff", EVENT_END);
    capture.assert_op_closed("compute_diff");
}
