//! Output sink
//!
//! One mutex guards the writer. Each record arrives as a complete line and is
//! written and flushed while the lock is held, so lines from concurrent
//! callers never interleave.

use serde::{Deserialize, Serialize};
use stamplog_errors::{LogError, Result};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputTarget {
    Stdout,
    Stderr,
    /// Opened in append mode, created if missing
    File(PathBuf),
}

impl From<String> for OutputTarget {
    fn from(s: String) -> Self {
        match s.as_str() {
            "stdout" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            _ => OutputTarget::File(PathBuf::from(s)),
        }
    }
}

impl From<OutputTarget> for String {
    fn from(target: OutputTarget) -> Self {
        target.to_string()
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("stdout"),
            OutputTarget::Stderr => f.write_str("stderr"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serialized writer shared by every emitting thread
pub struct Sink {
    writer: Mutex<Box<dyn Write + Send>>,
    failed: AtomicBool,
}

impl Sink {
    /// # Errors
    ///
    /// `OutputUnavailable` if a file target cannot be opened for append.
    pub fn open(target: &OutputTarget) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match target {
            OutputTarget::Stdout => Box::new(io::stdout()),
            OutputTarget::Stderr => Box::new(io::stderr()),
            OutputTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LogError::OutputUnavailable {
                        target: target.to_string(),
                        source,
                    })?;
                Box::new(file)
            }
        };
        Ok(Self::from_writer(writer))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            failed: AtomicBool::new(false),
        }
    }

    /// Write one complete line and flush it
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line)?;
        writer.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }

    /// Report an output failure on stderr, once per sink
    ///
    /// A closed stdout fails every write; only the first one is reported.
    /// Returns whether this call produced the report.
    pub(crate) fn report_failure(&self, context: &str, err: io::Error) -> bool {
        if self.failed.swap(true, Ordering::Relaxed) {
            return false;
        }
        report_internal(context, &LogError::from(err));
        true
    }

    // A panic while writing leaves the writer usable; keep logging.
    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

/// Report a failure of the logging pipeline itself
///
/// Goes to stderr directly; routing it through the facade could recurse.
pub(crate) fn report_internal(context: &str, err: &LogError) {
    eprintln!("stamplog: {context}: {err} [{}]", err.code());
}
