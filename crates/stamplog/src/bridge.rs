//! Bridge from `tracing` into the facade
//!
//! Libraries instrumented with `tracing` end up in the same JSON stream as
//! direct facade calls. Events map TRACE and DEBUG to Debug, INFO to Info,
//! WARN to Warning, ERROR to Error. The `message` field becomes `msg`; every
//! other field becomes a structured field.

use stamplog_core_types::{Severity, Value};
use stamplog_errors::{LogError, Result};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::caller::Caller;
use crate::facade::Message;
use crate::init::with_current;

pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::TRACE | Level::DEBUG => Severity::Debug,
        Level::INFO => Severity::Info,
        Level::WARN => Severity::Warning,
        Level::ERROR => Severity::Error,
    }
}

/// Collects event fields as alternating key/value arguments
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    kvs: Vec<Value>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.kvs.push(Value::from(field.name()));
            self.kvs.push(value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::Opaque(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }
}

/// `tracing` layer that forwards events to the active facade
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLayer;

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = severity_for(metadata.level());
        if !with_current(|facade| facade.enabled(severity)) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let caller = Caller::new(
            metadata.file().unwrap_or("<unknown>"),
            metadata.line().unwrap_or(0),
            None,
        );
        let message = visitor.message.unwrap_or_default();
        with_current(|facade| {
            facade.log(severity, caller, Message::Text(&message), &visitor.kvs);
        });
    }
}

/// Register [`FacadeLayer`] as the global `tracing` subscriber
///
/// # Errors
///
/// `InvalidConfig` if a global subscriber is already set.
pub fn install() -> Result<()> {
    tracing_subscriber::registry()
        .with(FacadeLayer)
        .try_init()
        .map_err(|err| LogError::invalid_config(format!("tracing subscriber: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(severity_for(&Level::TRACE), Severity::Debug);
        assert_eq!(severity_for(&Level::DEBUG), Severity::Debug);
        assert_eq!(severity_for(&Level::INFO), Severity::Info);
        assert_eq!(severity_for(&Level::WARN), Severity::Warning);
        assert_eq!(severity_for(&Level::ERROR), Severity::Error);
    }
}
