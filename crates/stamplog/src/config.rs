//! Facade configuration
//!
//! [`Config`] is plain data: it can be built in code, taken from one of the
//! presets, or deserialized from a host application's own config file.
//! [`Config::build`] validates it and produces a [`Facade`].

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use stamplog_core_types::{schema, Severity};
use stamplog_errors::{LogError, Result};
use std::io::Write;
use std::time::Duration;

use crate::facade::Facade;
use crate::sink::{OutputTarget, Sink};

/// Key names and formatting for the JSON encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    /// strftime pattern for the time field
    pub time_format: String,
    /// Value of the logger name field
    pub name: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: schema::KEY_TIME.to_string(),
            level_key: schema::KEY_LEVEL.to_string(),
            name_key: schema::KEY_NAME.to_string(),
            caller_key: schema::KEY_CALLER.to_string(),
            message_key: schema::KEY_MESSAGE.to_string(),
            stacktrace_key: schema::KEY_STACKTRACE.to_string(),
            time_format: schema::TIME_FORMAT.to_string(),
            name: schema::DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

/// Burst-then-ratio sampling of repeated records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Records per bucket written unconditionally in each tick
    pub initial: u64,
    /// After the burst, every n-th record is written
    pub thereafter: u64,
    pub tick_ms: u64,
}

impl SamplingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: schema::SAMPLING_INITIAL,
            thereafter: schema::SAMPLING_THEREAFTER,
            tick_ms: schema::SAMPLING_TICK.as_millis() as u64,
        }
    }
}

/// Complete facade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum severity written
    pub level: Severity,
    /// Development mode lowers the stack trace level to Warning
    pub development: bool,
    pub disable_caller: bool,
    pub disable_stacktrace: bool,
    /// `None` writes every record
    pub sampling: Option<SamplingConfig>,
    pub encoder: EncoderConfig,
    pub output: OutputTarget,
}

impl Config {
    /// Info threshold, no stack traces, JSON to stdout
    pub fn production() -> Self {
        Self {
            level: Severity::Info,
            development: false,
            disable_caller: false,
            disable_stacktrace: true,
            sampling: Some(SamplingConfig::default()),
            encoder: EncoderConfig::default(),
            output: OutputTarget::Stdout,
        }
    }

    /// Debug threshold, stack traces from Warning up, JSON to stdout
    pub fn development() -> Self {
        Self {
            level: Severity::Debug,
            development: true,
            disable_stacktrace: false,
            ..Self::production()
        }
    }

    /// Preset selected by the verbose flag
    pub fn for_debug(debug: bool) -> Self {
        if debug {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Lowest severity that carries a stack trace, if any
    pub fn stack_level(&self) -> Option<Severity> {
        if self.disable_stacktrace {
            None
        } else if self.development {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    /// Semantic checks serde cannot express
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for empty keys, a zero sampling ratio or tick, or an
    /// empty output path; `InvalidTimeFormat` for a bad strftime pattern.
    pub fn validate(&self) -> Result<()> {
        let enc = &self.encoder;
        for (name, key) in [
            ("time_key", &enc.time_key),
            ("level_key", &enc.level_key),
            ("message_key", &enc.message_key),
        ] {
            if key.is_empty() {
                return Err(LogError::invalid_config(format!("{name} must not be empty")));
            }
        }
        if !self.disable_caller && enc.caller_key.is_empty() {
            return Err(LogError::invalid_config(
                "caller_key must not be empty while caller is enabled",
            ));
        }
        if !self.disable_stacktrace && enc.stacktrace_key.is_empty() {
            return Err(LogError::invalid_config(
                "stacktrace_key must not be empty while stack traces are enabled",
            ));
        }
        if enc.name_key.is_empty() {
            return Err(LogError::invalid_config("name_key must not be empty"));
        }

        if enc.time_format.is_empty()
            || StrftimeItems::new(&enc.time_format).any(|item| matches!(item, Item::Error))
        {
            return Err(LogError::InvalidTimeFormat {
                format: enc.time_format.clone(),
            });
        }

        if let Some(sampling) = &self.sampling {
            if sampling.thereafter == 0 {
                return Err(LogError::invalid_config("sampling.thereafter must be at least 1"));
            }
            if sampling.tick_ms == 0 {
                return Err(LogError::invalid_config("sampling.tick_ms must be at least 1"));
            }
        }

        if let OutputTarget::File(path) = &self.output {
            if path.as_os_str().is_empty() {
                return Err(LogError::invalid_config("output path must not be empty"));
            }
        }
        Ok(())
    }

    /// Validate, open the output target and build a facade
    ///
    /// # Errors
    ///
    /// Any [`Config::validate`] error, or `OutputUnavailable`.
    pub fn build(&self) -> Result<Facade> {
        self.validate()?;
        let sink = Sink::open(&self.output)?;
        Ok(Facade::new(self, sink))
    }

    /// Like [`Config::build`], writing to `writer` instead of the output target
    ///
    /// # Errors
    ///
    /// Any [`Config::validate`] error.
    pub fn build_with_writer<W: Write + Send + 'static>(&self, writer: W) -> Result<Facade> {
        self.validate()?;
        Ok(Facade::new(self, Sink::from_writer(writer)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::production()
    }
}
