//! Core types shared across stamplog crates
//!
//! - **Severity**: the ordered level enumeration used for filtering
//! - **Value**: the closed value type carried by messages and structured fields
//! - **Schema constants**: canonical field keys, sentinels and defaults

pub mod schema;
pub mod severity;
pub mod value;

pub use severity::Severity;
pub use value::Value;
