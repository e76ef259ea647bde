//! Stack traces attached to records at or above the stack level
//!
//! A trace starts at the code that logged. Leading frames that belong to the
//! logging pipeline itself are dropped and the remaining frames renumbered.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::Write;

/// Crates whose frames can sit between the caller and the capture point
const PIPELINE_CRATES: [&str; 5] = [
    "stamplog",
    "std",
    "tracing",
    "tracing_core",
    "tracing_subscriber",
];

/// Capture the current stack, starting at the first frame outside the pipeline
pub fn capture() -> String {
    let backtrace = Backtrace::force_capture();
    let rendered = backtrace.to_string();
    match backtrace.status() {
        BacktraceStatus::Captured => trim_pipeline_frames(&rendered),
        _ => rendered,
    }
}

struct Frame<'a> {
    symbol: &'a str,
    locations: Vec<&'a str>,
}

/// `   3: app::main` yields `app::main`
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(symbol)
}

fn is_pipeline_frame(symbol: &str) -> bool {
    let path = symbol.trim_start_matches('<');
    let krate = path.split("::").next().unwrap_or(path);
    PIPELINE_CRATES.contains(&krate)
}

/// Drop the leading pipeline frames of a rendered backtrace
///
/// Input that does not look like a rendered backtrace, or that has no frame
/// outside the pipeline, is returned unchanged.
pub fn trim_pipeline_frames(trace: &str) -> String {
    let mut frames: Vec<Frame<'_>> = Vec::new();
    for line in trace.lines() {
        match (frame_symbol(line), frames.last_mut()) {
            (Some(symbol), _) => frames.push(Frame {
                symbol,
                locations: Vec::new(),
            }),
            (None, Some(frame)) => frame.locations.push(line),
            (None, None) => return trace.to_string(),
        }
    }

    let skip = frames
        .iter()
        .take_while(|frame| is_pipeline_frame(frame.symbol))
        .count();
    if skip == frames.len() {
        return trace.to_string();
    }

    let mut out = String::with_capacity(trace.len());
    for (index, frame) in frames[skip..].iter().enumerate() {
        let _ = writeln!(out, "{index:4}: {}", frame.symbol);
        for location in &frame.locations {
            out.push_str(location);
            out.push('\n');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "   0: stamplog::stacktrace::capture
             at ./crates/stamplog/src/stacktrace.rs:21:21
   1: stamplog::facade::Facade::log
             at ./crates/stamplog/src/facade.rs:120:17
   2: <tracing_subscriber::layered::Layered<L,S> as tracing_core::subscriber::Subscriber>::event
   3: billing::invoice::close
             at ./src/invoice.rs:42:9
   4: billing::main
             at ./src/main.rs:7:5
";

    #[test]
    fn test_trace_starts_at_caller() {
        let trimmed = trim_pipeline_frames(TRACE);
        let lines: Vec<&str> = trimmed.lines().collect();

        assert_eq!(lines[0], "   0: billing::invoice::close");
        assert_eq!(lines[1], "             at ./src/invoice.rs:42:9");
        assert_eq!(lines[2], "   1: billing::main");
        assert!(!trimmed.contains("stamplog::"));
        assert!(!trimmed.contains("tracing_core::"));
    }

    #[test]
    fn test_caller_frames_later_in_trace_are_kept() {
        let trace = "   0: stamplog::facade::Facade::log
   1: app::run
   2: stamplog::init::with_current
   3: app::main
";
        let trimmed = trim_pipeline_frames(trace);
        assert!(trimmed.starts_with("   0: app::run"));
        assert!(trimmed.contains("   1: stamplog::init::with_current"));
    }

    #[test]
    fn test_unrecognized_input_is_unchanged() {
        assert_eq!(trim_pipeline_frames("disabled backtrace"), "disabled backtrace");

        let only_pipeline = "   0: stamplog::facade::Facade::log\n";
        assert_eq!(trim_pipeline_frames(only_pipeline), only_pipeline);
    }

    #[test]
    fn test_pipeline_crate_detection() {
        assert!(is_pipeline_frame("stamplog::emit::emit::{{closure}}"));
        assert!(is_pipeline_frame("<stamplog::bridge::FacadeLayer as tracing_subscriber::layer::Layer<S>>::on_event"));
        assert!(is_pipeline_frame("std::backtrace::Backtrace::create"));
        assert!(!is_pipeline_frame("stamplog_cli::main"));
        assert!(!is_pipeline_frame("core::ops::function::FnOnce::call_once"));
    }

    #[test]
    fn test_capture_skips_own_frames() {
        let trace = capture();
        let first = trace.lines().next().unwrap_or_default();
        assert!(!first.contains("stamplog::stacktrace::capture"), "{trace}");
    }
}
