//! Logging macros
//!
//! Each macro records the call site and enclosing function, and skips
//! argument conversion entirely when the level is disabled.
//!
//! - `debug!(a, b, ..)` / `debugf!("{}", x)` / `debugw!("msg", "k", v, ..)`;
//!   `debug!()` logs an empty message
//! - the same trio for `info`, `warning`, `error` and `fatal`
//! - `log_panic!(..)` / `log_panicf!(..)`, named so they never shadow
//!   `std::panic!`

#[doc(hidden)]
#[macro_export]
macro_rules! __log_values {
    ($severity:ident) => {{
        if $crate::enabled($crate::Severity::$severity) {
            $crate::emit(
                $crate::Severity::$severity,
                $crate::caller!(),
                $crate::Message::Values(&[]),
                &[],
            );
        }
    }};
    ($severity:ident, $($arg:expr),+ $(,)?) => {{
        if $crate::enabled($crate::Severity::$severity) {
            $crate::emit(
                $crate::Severity::$severity,
                $crate::caller!(),
                $crate::Message::Values(&[$($crate::Value::from($arg)),+]),
                &[],
            );
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_format {
    ($severity:ident, $($arg:tt)+) => {{
        if $crate::enabled($crate::Severity::$severity) {
            $crate::emit(
                $crate::Severity::$severity,
                $crate::caller!(),
                $crate::Message::Args(::core::format_args!($($arg)+)),
                &[],
            );
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_fields {
    ($severity:ident, $msg:expr $(, $kv:expr)* $(,)?) => {{
        if $crate::enabled($crate::Severity::$severity) {
            $crate::emit(
                $crate::Severity::$severity,
                $crate::caller!(),
                $crate::Message::Text(::core::convert::AsRef::<str>::as_ref(&$msg)),
                &[$($crate::Value::from($kv)),*],
            );
        }
    }};
}

/// Log concatenated values at DEBUG level
///
/// ```
/// stamplog::debug!("cache size=", 42);
/// ```
#[macro_export]
macro_rules! debug {
    () => { $crate::__log_values!(Debug) };
    ($($arg:tt)+) => { $crate::__log_values!(Debug, $($arg)+) };
}

/// Log a formatted message at DEBUG level
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => { $crate::__log_format!(Debug, $($arg)+) };
}

/// Log a message with alternating key/value arguments at DEBUG level
#[macro_export]
macro_rules! debugw {
    ($($arg:tt)+) => { $crate::__log_fields!(Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    () => { $crate::__log_values!(Info) };
    ($($arg:tt)+) => { $crate::__log_values!(Info, $($arg)+) };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => { $crate::__log_format!(Info, $($arg)+) };
}

/// ```
/// stamplog::infow!("user signed in", "user", "alice", "attempts", 3);
/// ```
#[macro_export]
macro_rules! infow {
    ($($arg:tt)+) => { $crate::__log_fields!(Info, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    () => { $crate::__log_values!(Warning) };
    ($($arg:tt)+) => { $crate::__log_values!(Warning, $($arg)+) };
}

#[macro_export]
macro_rules! warningf {
    ($($arg:tt)+) => { $crate::__log_format!(Warning, $($arg)+) };
}

#[macro_export]
macro_rules! warningw {
    ($($arg:tt)+) => { $crate::__log_fields!(Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    () => { $crate::__log_values!(Error) };
    ($($arg:tt)+) => { $crate::__log_values!(Error, $($arg)+) };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => { $crate::__log_format!(Error, $($arg)+) };
}

#[macro_export]
macro_rules! errorw {
    ($($arg:tt)+) => { $crate::__log_fields!(Error, $($arg)+) };
}

/// Log at PANIC level, then unwind with the message as payload
///
/// ```should_panic
/// stamplog::log_panic!("invariant broken: ", 7);
/// ```
#[macro_export]
macro_rules! log_panic {
    () => {
        $crate::emit_panic($crate::caller!(), $crate::Message::Values(&[]))
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::emit_panic(
            $crate::caller!(),
            $crate::Message::Values(&[$($crate::Value::from($arg)),+]),
        )
    };
}

#[macro_export]
macro_rules! log_panicf {
    ($($arg:tt)+) => {
        $crate::emit_panic($crate::caller!(), $crate::Message::Args(::core::format_args!($($arg)+)))
    };
}

/// Log at FATAL level, then exit the process with status 1
#[macro_export]
macro_rules! fatal {
    () => {
        $crate::emit_fatal($crate::caller!(), $crate::Message::Values(&[]), &[])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::emit_fatal(
            $crate::caller!(),
            $crate::Message::Values(&[$($crate::Value::from($arg)),+]),
            &[],
        )
    };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::emit_fatal(
            $crate::caller!(),
            $crate::Message::Args(::core::format_args!($($arg)+)),
            &[],
        )
    };
}

#[macro_export]
macro_rules! fatalw {
    ($msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::emit_fatal(
            $crate::caller!(),
            $crate::Message::Text(::core::convert::AsRef::<str>::as_ref(&$msg)),
            &[$($crate::Value::from($kv)),*],
        )
    };
}
