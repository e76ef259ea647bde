//! Severity levels
//!
//! Levels are totally ordered by criticality; a record is emitted when its
//! severity is greater than or equal to the configured threshold.

use serde::{Deserialize, Serialize};
use stamplog_errors::LogError;
use std::fmt;
use std::str::FromStr;

/// Ordered log severity, least to most critical
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    /// Logs, then unwinds the calling stack
    Panic = 4,
    /// Logs, then exits the process with status 1
    Fatal = 5,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Panic,
        Severity::Fatal,
    ];

    /// Uppercase name as rendered in the `level` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }

    /// Numeric representation, stable across releases
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::as_u8`]
    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Whether emitting at this severity ends normal control flow
    pub fn is_terminal(&self) -> bool {
        matches!(self, Severity::Panic | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(LogError::InvalidLevel {
                input: s.to_string(),
            }),
        }
    }
}

/// Deserializes through [`FromStr`], so config files accept the same
/// spellings as the command line.
impl TryFrom<String> for Severity {
    type Error = LogError;

    fn try_from(s: String) -> Result<Self, LogError> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stamplog_errors::ErrorKind;

    #[test]
    fn test_total_order() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Panic);
        assert!(Severity::Panic < Severity::Fatal);

        let mut shuffled = vec![
            Severity::Fatal,
            Severity::Debug,
            Severity::Error,
            Severity::Panic,
            Severity::Info,
            Severity::Warning,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Severity::ALL.to_vec());
    }

    #[test]
    fn test_parse_accepts_aliases_and_case() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" Warning ".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::Fatal);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
    }

    #[test]
    fn test_u8_round_trip_and_out_of_range() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_u8(severity.as_u8()), Some(severity));
        }
        assert_eq!(Severity::from_u8(6), None);
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Panic.to_string(), "PANIC");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
        let parsed: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
    }

    #[test]
    fn test_deserialize_ignores_case() {
        let parsed: Severity = serde_json::from_str("\"INFO\"").unwrap();
        assert_eq!(parsed, Severity::Info);
        let parsed: Severity = serde_json::from_str("\"Warning\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
        assert!(serde_json::from_str::<Severity>("\"verbose\"").is_err());
    }

    #[test]
    fn test_terminal_levels() {
        assert!(Severity::Panic.is_terminal());
        assert!(Severity::Fatal.is_terminal());
        assert!(!Severity::Error.is_terminal());
    }
}
