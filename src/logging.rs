use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directory for log files
const LOGS_DIR: &str = "logs";

/// Where and how much to log
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory the rolling log files are written to
    pub dir: PathBuf,
    /// File name prefix for the daily log files
    pub file_name: String,
    /// Filter directive used when RUST_LOG is not set
    pub default_filter: String,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from(LOGS_DIR),
            file_name: "permissions.log".to_string(),
            default_filter: "info".to_string(),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the filter directive, e.g. `nsperm=debug`
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the logging system
/// Logs will be written to the configured directory only (no console output)
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.dir)?;

    // File appender - daily rotation
    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.dir, &config.file_name);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // RUST_LOG wins over the configured default
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging system initialized");
    tracing::info!(
        "Log files location: {}",
        config.dir.join(&config.file_name).display()
    );

    Ok(())
}

/// Check if the configured logs directory exists
pub fn logs_dir_exists(config: &LoggingConfig) -> bool {
    Path::new(&config.dir).exists()
}
