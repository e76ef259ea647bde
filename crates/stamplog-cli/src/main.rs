//! stamplog demo
//!
//! Emits records through the global facade so the JSON output and the
//! Panic/Fatal process behavior can be observed from outside.

use clap::Parser;
use stamplog::{Config, LogError, Severity};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "stamplog-demo")]
#[command(about = "Emit structured log records to stdout", long_about = None)]
struct Cli {
    /// Initialize in development mode (Debug threshold, stack traces)
    #[arg(long)]
    debug: bool,

    /// Load the logger configuration from a TOML file instead
    #[arg(long, conflicts_with = "debug")]
    config: Option<PathBuf>,

    /// Severity to emit at: debug, info, warning, error, panic, fatal
    #[arg(long, default_value = "info")]
    level: Severity,

    /// Use the structured form and attach an `iteration` field
    #[arg(long)]
    structured: bool,

    /// Number of records to emit
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Message text
    message: String,
}

fn load_config(path: &Path) -> Result<Config, LogError> {
    let raw = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)
        .map_err(|e| LogError::invalid_config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

fn emit(cli: &Cli, iteration: u32) {
    let msg = cli.message.as_str();
    match (cli.level, cli.structured) {
        (Severity::Debug, false) => stamplog::debug!(msg),
        (Severity::Debug, true) => stamplog::debugw!(msg, "iteration", iteration),
        (Severity::Info, false) => stamplog::info!(msg),
        (Severity::Info, true) => stamplog::infow!(msg, "iteration", iteration),
        (Severity::Warning, false) => stamplog::warning!(msg),
        (Severity::Warning, true) => stamplog::warningw!(msg, "iteration", iteration),
        (Severity::Error, false) => stamplog::error!(msg),
        (Severity::Error, true) => stamplog::errorw!(msg, "iteration", iteration),
        (Severity::Panic, _) => stamplog::log_panic!(msg),
        (Severity::Fatal, false) => stamplog::fatal!(msg),
        (Severity::Fatal, true) => stamplog::fatalw!(msg, "iteration", iteration),
    }
}

fn main() {
    let cli = Cli::parse();

    match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => stamplog::init_with_config(&config),
            Err(e) => {
                eprintln!("Error: {} [{}]", e, e.code());
                std::process::exit(2);
            }
        },
        None => stamplog::init(cli.debug),
    }

    for iteration in 0..cli.repeat {
        emit(&cli, iteration);
    }
    stamplog::current().sync();
}
