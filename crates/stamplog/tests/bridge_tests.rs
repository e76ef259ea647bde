#![allow(clippy::unwrap_used, clippy::expect_used)]

use stamplog::test_capture::{global_test_lock, init_test_capture};
use stamplog::Config;
use std::sync::Once;

static BRIDGE: Once = Once::new();

fn ensure_bridge() {
    BRIDGE.call_once(|| stamplog::bridge::install().unwrap());
}

fn unsampled() -> Config {
    Config {
        sampling: None,
        ..Config::production()
    }
}

#[test]
fn test_tracing_event_reaches_facade() {
    let _guard = global_test_lock();
    ensure_bridge();
    let capture = init_test_capture(&unsampled()).unwrap();

    tracing::info!(user = "alice", attempts = 3, "signed in");

    let records = capture.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["msg"], "signed in");
    assert_eq!(record["user"], "alice");
    assert_eq!(record["attempts"], 3);
    assert!(record["caller"]
        .as_str()
        .unwrap()
        .starts_with("tests/bridge_tests.rs:"));
}

#[test]
fn test_tracing_levels_are_mapped_and_filtered() {
    let _guard = global_test_lock();
    ensure_bridge();
    let capture = init_test_capture(&unsampled()).unwrap();

    tracing::debug!("below threshold");
    tracing::warn!(code = 503, "upstream slow");
    tracing::error!("upstream down");

    let records = capture.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["level"], "WARNING");
    assert_eq!(records[0]["code"], 503);
    assert_eq!(records[1]["level"], "ERROR");
}

#[test]
fn test_debug_formatted_fields() {
    let _guard = global_test_lock();
    ensure_bridge();
    let capture = init_test_capture(&unsampled()).unwrap();

    let ids = vec![1, 2];
    tracing::info!(ids = ?ids, "batch");

    assert_eq!(capture.records()[0]["ids"], "[1, 2]");
}

#[test]
fn test_second_install_is_rejected() {
    let _guard = global_test_lock();
    ensure_bridge();

    let err = stamplog::bridge::install().unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_CONFIG");
}
