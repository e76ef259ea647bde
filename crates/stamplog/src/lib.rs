//! stamplog - process-wide structured logging facade
//!
//! One global logger writes leveled records as JSON lines to stdout:
//!
//! ```text
//! {"ts":"Mar 07 09:05:02","level":"INFO","logger":"root","caller":"src/main.rs:12.main()","msg":"user signed in","user":"alice"}
//! ```
//!
//! - Single initialization point via [`init`]; a second call replaces the first
//! - Leveled entry points for Debug, Info, Warning, Error, Panic and Fatal
//! - Structured key/value fields (`*w` variants)
//! - Sampling of repeated records, optional caller and stack traces
//! - Panic unwinds after logging, Fatal exits with status 1 after logging
//!
//! # Usage
//!
//! ```rust
//! stamplog::init(true);
//!
//! stamplog::info!("listening on ", "0.0.0.0:", 8080);
//! stamplog::debugf!("retry {} of {}", 1, 3);
//! stamplog::warningw!("slow request", "path", "/health", "elapsed", std::time::Duration::from_millis(1500));
//! ```

pub mod bridge;
pub mod caller;
pub mod config;
mod emit;
pub mod encoder;
pub mod facade;
pub mod fields;
pub mod init;
pub mod level;
mod macros;
pub mod sampler;
pub mod sink;
pub mod stacktrace;
pub mod test_capture;

pub use caller::Caller;
pub use config::{Config, EncoderConfig, SamplingConfig};
pub use emit::{emit, emit_fatal, emit_panic};
pub use facade::{Facade, Message};
pub use init::{current, enabled, init, init_with_config, install, level, set_level};
pub use level::AtomicLevel;
pub use sink::OutputTarget;
pub use stamplog_core_types::{schema, Severity, Value};
pub use stamplog_errors::{ErrorKind, LogError, Result};
