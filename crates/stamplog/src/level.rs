//! Runtime-adjustable threshold

use stamplog_core_types::Severity;
use std::sync::atomic::{AtomicU8, Ordering};

/// Threshold shared by a facade and its callers
///
/// Changing it takes effect for the next emit on any thread.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub fn new(level: Severity) -> Self {
        Self(AtomicU8::new(level.as_u8()))
    }

    pub fn level(&self) -> Severity {
        Severity::from_u8(self.0.load(Ordering::Relaxed)).unwrap_or(Severity::Fatal)
    }

    pub fn set_level(&self, level: Severity) {
        self.0.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Records at `severity` pass the threshold
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}
