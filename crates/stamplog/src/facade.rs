//! The logger behind the global entry points
//!
//! A [`Facade`] is immutable once built apart from its [`AtomicLevel`].
//! Reconfiguring the process means building a new one and swapping it in.

use chrono::Local;
use stamplog_core_types::{Severity, Value};
use std::fmt;

use crate::caller::Caller;
use crate::config::Config;
use crate::encoder::{JsonEncoder, Record};
use crate::fields::pair_fields;
use crate::level::AtomicLevel;
use crate::sampler::Sampler;
use crate::sink::{report_internal, Sink};
use crate::stacktrace;

/// Message argument of an emit call, rendered only if the record is written
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    /// Values concatenated with [`Value::concat`]
    Values(&'a [Value]),
    /// A `format_args!` template
    Args(fmt::Arguments<'a>),
    Text(&'a str),
}

impl Message<'_> {
    pub fn render(&self) -> String {
        match self {
            Message::Values(values) => Value::concat(values),
            Message::Args(args) => match args.as_str() {
                Some(s) => s.to_string(),
                None => fmt::format(*args),
            },
            Message::Text(text) => text.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Facade {
    level: AtomicLevel,
    add_caller: bool,
    stack_level: Option<Severity>,
    sampler: Option<Sampler>,
    encoder: JsonEncoder,
    /// `None` for the disabled facade
    sink: Option<Sink>,
}

impl Facade {
    pub(crate) fn new(config: &Config, sink: Sink) -> Self {
        Self {
            level: AtomicLevel::new(config.level),
            add_caller: !config.disable_caller,
            stack_level: config.stack_level(),
            sampler: config
                .sampling
                .map(|s| Sampler::new(s.initial, s.thereafter, s.tick())),
            encoder: JsonEncoder::new(config.encoder.clone()),
            sink: Some(sink),
        }
    }

    /// A facade that writes nothing
    ///
    /// Active before initialization and after a failed one.
    pub fn disabled() -> Self {
        let config = Config::production();
        Self {
            level: AtomicLevel::new(config.level),
            add_caller: false,
            stack_level: None,
            sampler: None,
            encoder: JsonEncoder::new(config.encoder),
            sink: None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.sink.is_none()
    }

    pub fn level(&self) -> Severity {
        self.level.level()
    }

    pub fn set_level(&self, level: Severity) {
        self.level.set_level(level);
    }

    /// Whether a record at `severity` would reach the sink, before sampling
    pub fn enabled(&self, severity: Severity) -> bool {
        self.sink.is_some() && self.level.enabled(severity)
    }

    /// Write one record if it passes the threshold and the sampler
    ///
    /// Never terminates; Panic and Fatal handling lives in the callers.
    pub fn log(&self, severity: Severity, caller: Caller, message: Message<'_>, fields: &[Value]) {
        let Some(sink) = &self.sink else {
            return;
        };
        if !self.level.enabled(severity) {
            return;
        }

        let message = message.render();
        if let Some(sampler) = &self.sampler {
            if !sampler.check(severity, &message) {
                return;
            }
        }

        let stacktrace = match self.stack_level {
            Some(stack_level) if severity >= stack_level => {
                Some(stacktrace::capture())
            }
            _ => None,
        };
        let record = Record {
            time: Local::now(),
            severity,
            caller: self.add_caller.then_some(caller),
            message: &message,
            fields: pair_fields(fields),
            stacktrace,
        };

        match self.encoder.encode(&record) {
            Ok(line) => {
                if let Err(err) = sink.write_line(&line) {
                    sink.report_failure("write failed", err);
                }
            }
            Err(err) => report_internal("encode failed", &err),
        }
    }

    /// Flush buffered output
    pub fn sync(&self) {
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.flush() {
                sink.report_failure("flush failed", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_capture::TestCapture;

    fn facade(config: Config) -> (Facade, TestCapture) {
        let capture = TestCapture::new();
        let facade = config.build_with_writer(capture.writer()).unwrap();
        (facade, capture)
    }

    fn here() -> Caller {
        Caller::new("src/facade.rs", 1, Some("here"))
    }

    #[test]
    fn test_below_threshold_writes_nothing() {
        let (facade, capture) = facade(Config::production());
        facade.log(Severity::Debug, here(), Message::Text("hidden"), &[]);
        assert_eq!(capture.byte_len(), 0);
    }

    #[test]
    fn test_disabled_facade_writes_nothing() {
        let facade = Facade::disabled();
        assert!(facade.is_disabled());
        assert!(!facade.enabled(Severity::Fatal));
        facade.log(Severity::Error, here(), Message::Text("dropped"), &[]);
    }

    #[test]
    fn test_set_level_applies_to_next_record() {
        let (facade, capture) = facade(Config::production());
        facade.set_level(Severity::Debug);
        facade.log(Severity::Debug, here(), Message::Text("now visible"), &[]);
        assert_eq!(capture.records().len(), 1);
        assert_eq!(capture.records()[0]["level"], "DEBUG");
    }

    #[test]
    fn test_message_variants_render() {
        let values = [Value::from("n="), Value::from(1), Value::from(2)];
        assert_eq!(Message::Values(&values).render(), "n=1 2");
        assert_eq!(Message::Args(format_args!("{}-{}", 1, 2)).render(), "1-2");
        assert_eq!(Message::Text("plain").render(), "plain");
    }

    #[test]
    fn test_stacktrace_follows_stack_level() {
        let (facade, capture) = facade(Config {
            sampling: None,
            ..Config::development()
        });
        facade.log(Severity::Info, here(), Message::Text("no trace"), &[]);
        facade.log(Severity::Warning, here(), Message::Text("trace"), &[]);

        let records = capture.records();
        assert!(records[0].get("stacktrace").is_none());
        assert!(records[1]["stacktrace"].is_string());
    }

    #[test]
    fn test_production_has_no_stacktrace() {
        let (facade, capture) = facade(Config::production());
        facade.log(Severity::Error, here(), Message::Text("failure"), &[]);
        assert!(capture.records()[0].get("stacktrace").is_none());
    }

    #[test]
    fn test_disable_caller_omits_key() {
        let (facade, capture) = facade(Config {
            disable_caller: true,
            ..Config::production()
        });
        facade.log(Severity::Info, here(), Message::Text("anonymous"), &[]);
        assert!(capture.records()[0].get("caller").is_none());
    }

    #[test]
    fn test_closed_output_keeps_logging() {
        struct Closed;

        impl std::io::Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
        }

        let facade = Config::production().build_with_writer(Closed).unwrap();
        for i in 0..10 {
            facade.log(Severity::Error, here(), Message::Values(&[Value::from(i)]), &[]);
        }
        facade.sync();
        assert!(facade.enabled(Severity::Error));
    }

    #[test]
    fn test_sampling_caps_repeated_messages() {
        let (facade, capture) = facade(Config::production());
        for _ in 0..250 {
            facade.log(Severity::Info, here(), Message::Text("flood"), &[]);
        }
        // 100 initial plus the 200th
        assert_eq!(capture.lines().len(), 101);
    }
}
