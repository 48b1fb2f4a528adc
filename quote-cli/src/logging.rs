//! Console and file logging for the CLI.
//!
//! Every logging choice is known once the arguments are parsed, so the
//! subscriber is assembled a single time and never reloaded. Console records
//! go to stderr; stdout is reserved for command output.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Logging choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Filter directive such as `debug` or `quote_core=trace`. Falls back to
    /// `RUST_LOG`, then to `info`.
    pub filter: Option<String>,
    /// Drops console output. File logging is unaffected.
    pub quiet: bool,
    /// Appends records to this file as well.
    pub file: Option<PathBuf>,
}

impl LogOptions {
    fn env_filter(&self) -> Result<EnvFilter> {
        match &self.filter {
            Some(directive) => EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log level '{directive}'")),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
        }
    }
}

/// Local wall-clock time, millisecond precision.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format(TIMESTAMP_FORMAT))
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once, before anything is logged.
///
/// # Errors
///
/// Fails on an unparsable filter, an unopenable log file, or when a
/// subscriber is already installed.
pub fn init(options: &LogOptions) -> Result<()> {
    let filter = options.env_filter()?;

    let console = (!options.quiet).then(|| {
        fmt::layer()
            .with_timer(LocalTime)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
    });

    let file = match &options.file {
        Some(path) => Some(
            fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("logging is already initialized")
}
