//! Canonical schema constants for the JSON line format
//!
//! Collectors reading the stream depend on these names.

use std::time::Duration;

// Record keys
pub const KEY_TIME: &str = "ts";
pub const KEY_LEVEL: &str = "level";
pub const KEY_NAME: &str = "logger";
pub const KEY_CALLER: &str = "caller";
pub const KEY_MESSAGE: &str = "msg";
pub const KEY_STACKTRACE: &str = "stacktrace";

/// Key used for structured arguments that could not be paired
pub const BAD_KEY: &str = "!BADKEY";

/// `Mon DD HH:MM:SS`, local time, no year or zone
pub const TIME_FORMAT: &str = "%b %d %H:%M:%S";

pub const DEFAULT_LOGGER_NAME: &str = "root";

// Sampling defaults
pub const SAMPLING_INITIAL: u64 = 100;
pub const SAMPLING_THEREAFTER: u64 = 100;
pub const SAMPLING_TICK: Duration = Duration::from_secs(1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keys_are_distinct() {
        let keys = [
            KEY_TIME,
            KEY_LEVEL,
            KEY_NAME,
            KEY_CALLER,
            KEY_MESSAGE,
            KEY_STACKTRACE,
            BAD_KEY,
        ];
        for (i, a) in keys.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
