//! JSON line encoder
//!
//! Writes keys in a fixed order: time, level, logger, caller, message, the
//! structured fields as given, then the stack trace. Duplicate field keys are
//! written as they come.

use chrono::{DateTime, Local};
use serde::Serialize;
use stamplog_core_types::{Severity, Value};
use stamplog_errors::Result;

use crate::caller::Caller;
use crate::config::EncoderConfig;

/// One record ready for encoding
#[derive(Debug)]
pub struct Record<'a> {
    pub time: DateTime<Local>,
    pub severity: Severity,
    pub caller: Option<Caller>,
    pub message: &'a str,
    pub fields: Vec<(&'a str, &'a Value)>,
    pub stacktrace: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Encode a record as one newline-terminated JSON object
    ///
    /// # Errors
    ///
    /// `Serialization` if a field value cannot be written as JSON.
    pub fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>> {
        let keys = &self.config;
        let mut line = Line::with_capacity(256);

        line.field(&keys.time_key, &record.time.format(&keys.time_format).to_string())?;
        line.field(&keys.level_key, record.severity.as_str())?;
        line.field(&keys.name_key, &keys.name)?;
        if let Some(caller) = &record.caller {
            line.field(&keys.caller_key, &caller.to_string())?;
        }
        line.field(&keys.message_key, record.message)?;
        for (key, value) in &record.fields {
            line.field(key, &value.to_json())?;
        }
        if let Some(stacktrace) = &record.stacktrace {
            line.field(&keys.stacktrace_key, stacktrace)?;
        }
        Ok(line.finish())
    }
}

struct Line {
    buf: Vec<u8>,
    empty: bool,
}

impl Line {
    fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity);
        buf.push(b'{');
        Self { buf, empty: true }
    }

    fn field<V: Serialize + ?Sized>(&mut self, key: &str, value: &V) -> Result<()> {
        if !self.empty {
            self.buf.push(b',');
        }
        self.empty = false;
        serde_json::to_writer(&mut self.buf, key)?;
        self.buf.push(b':');
        serde_json::to_writer(&mut self.buf, value)?;
        Ok(())
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(b"}\n");
        self.buf
    }
}
