//! Emit paths behind the logging macros
//!
//! Every record carries a [`Caller`] captured by the macro at the call site,
//! so the public surface is the macros alone.

use stamplog_core_types::{Severity, Value};

use crate::caller::Caller;
use crate::facade::Message;
use crate::init::with_current;

/// Route one record through the active facade
///
/// Low-level entry point used by the logging macros.
#[doc(hidden)]
pub fn emit(severity: Severity, caller: Caller, message: Message<'_>, fields: &[Value]) {
    with_current(|facade| facade.log(severity, caller, message, fields));
}

/// Write a Panic record, then unwind with the message as a `String` payload
///
/// The unwind happens even when the threshold filters the record.
#[doc(hidden)]
#[track_caller]
pub fn emit_panic(caller: Caller, message: Message<'_>) -> ! {
    let text = message.render();
    with_current(|facade| facade.log(Severity::Panic, caller, Message::Text(&text), &[]));
    std::panic::panic_any(text)
}

/// Write a Fatal record, flush, then exit with status 1
#[doc(hidden)]
pub fn emit_fatal(caller: Caller, message: Message<'_>, fields: &[Value]) -> ! {
    with_current(|facade| {
        facade.log(Severity::Fatal, caller, message, fields);
        facade.sync();
    });
    std::process::exit(1)
}
