//! Logging setup for the bikeshare explorer
//!
//! Console output belongs to the interactive prompts, so log events go to a
//! rolling file in the app data directory. Warnings and errors are also
//! mirrored on stderr.
//!
//! ## Usage
//!
//! ```no_run
//! // Initialize once at startup
//! bikeshare::logging::init().expect("Failed to initialize logging");
//!
//! tracing::info!("Session started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/bikeshare/logs`
/// - macOS: `~/Library/Application Support/bikeshare/logs`
/// - Linux: `~/.local/share/bikeshare/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("bikeshare").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes file logging plus a warn-level stderr layer
///
/// The file `bikeshare.<date>.log` rotates daily, keeping 10 old files.
/// `RUST_LOG` overrides the default `info` filter.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("bikeshare")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(env_filter);

    let stderr_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);

    Ok(())
}
