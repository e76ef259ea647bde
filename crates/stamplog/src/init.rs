//! Process-wide facade
//!
//! The active [`Facade`] lives behind an [`ArcSwap`]. Emitters take a cheap
//! snapshot for the duration of one call; [`init`] and [`install`] replace the
//! whole facade atomically, so a re-initialization racing with in-flight
//! emits never exposes a half-built state.

use arc_swap::ArcSwap;
use stamplog_core_types::Severity;
use std::sync::{Arc, OnceLock};

use crate::config::Config;
use crate::facade::Facade;
use crate::sink::report_internal;

static ACTIVE: OnceLock<ArcSwap<Facade>> = OnceLock::new();

fn active() -> &'static ArcSwap<Facade> {
    ACTIVE.get_or_init(|| ArcSwap::from_pointee(Facade::disabled()))
}

/// Initialize the global facade
///
/// `debug == true` selects [`Config::development`] (Debug threshold, stack
/// traces), otherwise [`Config::production`]. Replaces any previous facade.
///
/// # Example
///
/// ```
/// stamplog::init(false);
/// stamplog::infow!("service started", "port", 8080);
/// ```
pub fn init(debug: bool) {
    init_with_config(&Config::for_debug(debug));
}

/// Initialize the global facade from an explicit configuration
///
/// Never panics or exits. If the configuration cannot be built, the error is
/// reported once on stderr and a disabled facade is installed.
pub fn init_with_config(config: &Config) {
    match config.build() {
        Ok(facade) => install(facade),
        Err(err) => {
            report_internal("logger init failed", &err);
            install(Facade::disabled());
        }
    }
}

/// Replace the global facade
pub fn install(facade: Facade) {
    active().store(Arc::new(facade));
}

/// Snapshot of the active facade
pub fn current() -> Arc<Facade> {
    active().load_full()
}

pub(crate) fn with_current<R>(f: impl FnOnce(&Facade) -> R) -> R {
    let guard = active().load();
    f(&**guard)
}

/// Threshold of the active facade
pub fn level() -> Severity {
    with_current(Facade::level)
}

/// Change the threshold of the active facade
pub fn set_level(level: Severity) {
    with_current(|facade| facade.set_level(level));
}

/// Whether a record at `severity` would currently be written
pub fn enabled(severity: Severity) -> bool {
    with_current(|facade| facade.enabled(severity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_capture::{global_test_lock, init_test_capture};

    #[test]
    fn test_init_is_replaceable() {
        let _guard = global_test_lock();

        init(true);
        assert_eq!(level(), Severity::Debug);
        init(false);
        assert_eq!(level(), Severity::Info);
        assert!(!enabled(Severity::Debug));
    }

    #[test]
    fn test_failed_init_installs_disabled_facade() {
        let _guard = global_test_lock();

        let config = Config {
            sampling: Some(crate::config::SamplingConfig {
                thereafter: 0,
                ..Default::default()
            }),
            ..Config::production()
        };
        init_with_config(&config);
        assert!(current().is_disabled());
        assert!(!enabled(Severity::Error));
    }

    #[test]
    fn test_set_level_changes_active_facade() {
        let _guard = global_test_lock();

        let capture = init_test_capture(&Config::production()).unwrap();
        set_level(Severity::Error);
        assert_eq!(level(), Severity::Error);
        assert!(!enabled(Severity::Warning));
        assert_eq!(capture.byte_len(), 0);
    }
}
