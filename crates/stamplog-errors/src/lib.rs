//! Error facility for stamplog
//!
//! Every fallible operation in the workspace returns [`LogError`]. Each
//! variant maps onto an [`ErrorKind`] with a stable code, so callers and tests
//! can match on the classification instead of the rendered message.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Parsing
    InvalidLevel,

    // Configuration
    InvalidConfig,
    InvalidTimeFormat,

    // Output pipeline
    OutputUnavailable,
    Serialization,
    Io,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLevel => "ERR_INVALID_LEVEL",
            ErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ErrorKind::InvalidTimeFormat => "ERR_INVALID_TIME_FORMAT",
            ErrorKind::OutputUnavailable => "ERR_OUTPUT_UNAVAILABLE",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Io => "ERR_IO",
        }
    }
}

/// Errors raised while building or driving the logging pipeline
#[derive(Error, Debug)]
pub enum LogError {
    /// Severity name did not match any known level
    #[error("Unrecognized level: {input:?}")]
    InvalidLevel { input: String },

    /// Configuration failed semantic validation
    #[error("Invalid logger configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The strftime pattern for timestamps could not be parsed
    #[error("Invalid time format: {format:?}")]
    InvalidTimeFormat { format: String },

    /// The output target could not be opened
    #[error("Cannot open log output {target}: {source}")]
    OutputUnavailable {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON
    #[error("Failed to encode log record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::InvalidLevel { .. } => ErrorKind::InvalidLevel,
            LogError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            LogError::InvalidTimeFormat { .. } => ErrorKind::InvalidTimeFormat,
            LogError::OutputUnavailable { .. } => ErrorKind::OutputUnavailable,
            LogError::Serialization(_) => ErrorKind::Serialization,
            LogError::Io(_) => ErrorKind::Io,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Shorthand for a configuration validation failure
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        LogError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
