//! Process-wide logging set up by the hosting process.
//!
//! [`init`] installs the global `tracing` subscriber and returns a
//! [`Telemetry`] handle. The handle owns the optional log file, hands
//! [`RequestLogger`]s to the HTTP layer and is consumed by
//! [`Telemetry::shutdown`] when the process stops. Nothing is configured at
//! import time.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per record.
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(TelemetryError::UnknownFormat(raw.to_owned())),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info`.
    pub level: String,
    /// Console format.
    pub format: LogFormat,
    /// File mirroring console output, if any.
    pub file: Option<PathBuf>,
}

/// Failures raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured format is neither `pretty` nor `json`.
    #[error("unknown log format `{0}`; expected `pretty` or `json`")]
    UnknownFormat(String),
    /// The filter directive does not parse.
    #[error("invalid log filter `{directive}`: {source}")]
    InvalidFilter {
        /// Offending directive.
        directive: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// The log file or its directory could not be opened.
    #[error("failed to open log file at {path}: {source}")]
    LogFile {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Another global subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the filter, letting `RUST_LOG` take precedence over `level`.
///
/// # Errors
/// Returns [`TelemetryError::InvalidFilter`] when `level` does not parse.
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_owned(),
        source,
    })
}

fn open_log_file(path: &Path) -> Result<Arc<File>, TelemetryError> {
    let to_error = |source| TelemetryError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(to_error)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    Ok(Arc::new(file))
}

/// Install the global subscriber described by `settings`.
///
/// # Errors
/// Returns a [`TelemetryError`] when the filter is invalid, the log file
/// cannot be opened or a subscriber is already installed.
pub fn init(settings: &LoggingSettings) -> Result<Telemetry, TelemetryError> {
    let filter = build_filter(&settings.level)?;
    let log_file = settings.file.as_deref().map(open_log_file).transpose()?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    layers.push(match settings.format {
        LogFormat::Pretty => fmt::layer().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    });
    if let Some(file) = &log_file {
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::clone(file))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)?;

    info!(
        level = settings.level.as_str(),
        format = ?settings.format,
        file = ?settings.file,
        "logging initialised"
    );
    Ok(Telemetry {
        settings: settings.clone(),
        log_file,
    })
}

/// Handle on the installed logging stack.
#[derive(Debug)]
pub struct Telemetry {
    settings: LoggingSettings,
    log_file: Option<Arc<File>>,
}

impl Telemetry {
    /// Handle for a process that installs no subscriber of its own, such
    /// as a test harness.
    pub fn disabled() -> Self {
        Self {
            settings: LoggingSettings {
                level: "off".to_owned(),
                format: LogFormat::default(),
                file: None,
            },
            log_file: None,
        }
    }

    /// Logger handed to the request-logging middleware. Silent when the
    /// configured level is `off`.
    pub fn request_logger(&self) -> RequestLogger {
        if self.settings.level.trim().eq_ignore_ascii_case("off") {
            RequestLogger::silent()
        } else {
            RequestLogger::new()
        }
    }

    /// Flush the log file and emit the final record.
    pub fn shutdown(self) {
        info!("logging shut down");
        if let Some(file) = self.log_file
            && let Err(error) = file.sync_all()
        {
            warn!(%error, "failed to flush log file");
        }
    }
}

/// Summary of one handled request.
#[derive(Debug, Clone, Copy)]
pub struct RequestOutcome<'a> {
    /// HTTP method.
    pub method: &'a str,
    /// Request path without the query string.
    pub path: &'a str,
    /// Response status code.
    pub status: u16,
    /// Time spent handling the request.
    pub elapsed: Duration,
}

/// Records one line per handled request.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    enabled: bool,
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLogger {
    /// Logger emitting access records.
    pub const fn new() -> Self {
        Self { enabled: true }
    }

    /// Logger that drops every record.
    pub const fn silent() -> Self {
        Self { enabled: false }
    }

    /// Whether records are emitted.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log `outcome` at a level matching its status class.
    pub fn record(&self, outcome: &RequestOutcome<'_>) {
        if !self.enabled {
            return;
        }
        let RequestOutcome {
            method,
            path,
            status,
            elapsed,
        } = *outcome;
        let elapsed_ms = elapsed.as_millis();
        if status >= 500 {
            error!(method, path, status, elapsed_ms, "request failed");
        } else if status >= 400 {
            warn!(method, path, status, elapsed_ms, "request rejected");
        } else {
            info!(method, path, status, elapsed_ms, "request handled");
        }
    }
}
