//! Test capture mode for deterministic logging assertions
//!
//! Builds facades that write into memory instead of stdout, and exposes the
//! captured lines as parsed JSON records.

use serde_json::Value as Json;
use stamplog_errors::Result;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::config::Config;
use crate::init::install;

/// Cloneable in-memory writer; every clone appends to the same buffer
#[derive(Clone, Default)]
pub struct CaptureSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handle for inspecting captured output
#[derive(Clone, Default)]
pub struct TestCapture {
    sink: CaptureSink,
}

impl TestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer to hand to [`Config::build_with_writer`]
    pub fn writer(&self) -> CaptureSink {
        self.sink.clone()
    }

    /// Total bytes written so far
    pub fn byte_len(&self) -> usize {
        self.sink.lock().len()
    }

    /// Raw lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.sink.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Every captured line parsed as JSON
    ///
    /// # Panics
    ///
    /// Panics if a line is not valid JSON
    pub fn records(&self) -> Vec<Json> {
        self.lines()
            .iter()
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|err| panic!("captured line is not JSON ({err}): {line}"))
            })
            .collect()
    }

    /// Count records matching a predicate
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Json) -> bool,
    {
        self.records().iter().filter(|r| predicate(r)).count()
    }

    /// Assert that a record exists with the given level and message
    ///
    /// # Panics
    ///
    /// Panics if no such record was captured
    pub fn assert_record_exists(&self, level: &str, msg: &str) {
        let records = self.records();
        let found = records
            .iter()
            .any(|r| r["level"] == level && r["msg"] == msg);
        assert!(
            found,
            "Expected record level={} msg={} not found in {} captured records",
            level,
            msg,
            records.len()
        );
    }

    pub fn clear(&self) {
        self.sink.lock().clear();
    }
}

/// Build a facade from `config` writing into a fresh capture, and install it
/// as the global facade
///
/// # Errors
///
/// Any [`Config::validate`] error.
pub fn init_test_capture(config: &Config) -> Result<TestCapture> {
    let capture = TestCapture::new();
    install(config.build_with_writer(capture.writer())?);
    Ok(capture)
}

static GLOBAL_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialize tests that replace the global facade
///
/// Hold the guard for the whole test body.
pub fn global_test_lock() -> MutexGuard<'static, ()> {
    GLOBAL_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
