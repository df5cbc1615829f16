//! Server configuration loaded via OrthoConfig.
//!
//! Values resolve from CLI flags, `STARTER_*` environment variables and an
//! optional configuration file, in that order of precedence. Every field is
//! optional; accessors apply the defaults.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::telemetry::{LogFormat, LoggingSettings, TelemetryError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILE: &str = "starter.log";
/// Largest `limit` accepted by the users listing unless overridden.
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 1000;

/// Configuration values controlling the HTTP server and its logging.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STARTER")]
pub struct ServerSettings {
    /// Interface the listener binds to.
    pub host: Option<String>,
    /// TCP port the listener binds to.
    pub port: Option<u16>,
    /// Default log filter, overridden by `RUST_LOG` when set.
    pub log_level: Option<String>,
    /// Console log format: `pretty` or `json`.
    pub log_format: Option<String>,
    /// Mirror log records into a file.
    #[ortho_config(default = false)]
    pub log_to_file: bool,
    /// Directory holding the log file.
    pub log_dir: Option<PathBuf>,
    /// Log file name inside `log_dir`.
    pub log_file: Option<String>,
    /// Ceiling for the `limit` query parameter on listings.
    pub max_page_limit: Option<u32>,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address pair handed to the listener.
    pub fn bind_address(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }

    /// Return the listing page ceiling.
    pub fn max_page_limit(&self) -> u32 {
        self.max_page_limit.unwrap_or(DEFAULT_MAX_PAGE_LIMIT)
    }

    /// Resolve the logging section.
    ///
    /// # Errors
    /// Returns [`TelemetryError::UnknownFormat`] for a format other than
    /// `pretty` or `json`.
    pub fn logging(&self) -> Result<LoggingSettings, TelemetryError> {
        let format = match self.log_format.as_deref() {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };
        let file = self.log_to_file.then(|| {
            self.log_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
                .join(self.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE))
        });
        Ok(LoggingSettings {
            level: self
                .log_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            format,
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "STARTER_HOST",
        "STARTER_PORT",
        "STARTER_LOG_LEVEL",
        "STARTER_LOG_FORMAT",
        "STARTER_LOG_TO_FILE",
        "STARTER_LOG_DIR",
        "STARTER_LOG_FILE",
        "STARTER_MAX_PAGE_LIMIT",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("starter")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("0.0.0.0".to_owned(), 8000));
        assert_eq!(settings.max_page_limit(), DEFAULT_MAX_PAGE_LIMIT);

        let logging = settings.logging().expect("default logging");
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Pretty);
        assert!(logging.file.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STARTER_HOST", Some("127.0.0.1".to_owned())),
            ("STARTER_PORT", Some("9090".to_owned())),
            ("STARTER_LOG_LEVEL", Some("debug".to_owned())),
            ("STARTER_LOG_FORMAT", Some("json".to_owned())),
            ("STARTER_LOG_TO_FILE", Some("true".to_owned())),
            ("STARTER_LOG_DIR", Some("/tmp/starter-logs".to_owned())),
            ("STARTER_LOG_FILE", Some("api.log".to_owned())),
            ("STARTER_MAX_PAGE_LIMIT", Some("50".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("127.0.0.1".to_owned(), 9090));
        assert_eq!(settings.max_page_limit(), 50);

        let logging = settings.logging().expect("logging");
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(
            logging.file,
            Some(PathBuf::from("/tmp/starter-logs").join("api.log"))
        );
    }

    #[rstest]
    fn log_file_defaults_apply_when_only_enabled() {
        let _guard = lock_env([
            ("STARTER_LOG_TO_FILE", Some("true".to_owned())),
            ("STARTER_LOG_DIR", None::<String>),
            ("STARTER_LOG_FILE", None::<String>),
            ("STARTER_LOG_FORMAT", None::<String>),
        ]);

        let logging = load_from_empty_args().logging().expect("logging");
        assert_eq!(logging.file, Some(PathBuf::from("logs").join("starter.log")));
    }

    #[rstest]
    fn unknown_log_format_is_rejected() {
        let _guard = lock_env([("STARTER_LOG_FORMAT", Some("xml".to_owned()))]);

        let err = load_from_empty_args()
            .logging()
            .expect_err("xml is not a log format");
        assert!(matches!(err, TelemetryError::UnknownFormat(ref raw) if raw == "xml"));
    }
}
