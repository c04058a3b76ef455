//! Tracing configuration for the quill binary.
//!
//! Library code logs through the `log` facade; the subscriber installed here
//! picks those records up through tracing-subscriber's `tracing-log` bridge.
//! Closing the script span logs how long the run took.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use quill_input::config::LoggingConfig;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Records are appended to the
/// configured log file, or go to stderr when there is none or it cannot be
/// opened.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
#[allow(clippy::print_stderr)]
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, ansi) = match config.log_file.as_deref().map(open_log) {
        Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), false),
        Some(Err(err)) => {
            eprintln!("Cannot open log file ({err}), logging to stderr");
            (BoxMakeWriter::new(io::stderr), true)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
