//! File logging setup.
//!
//! The library logs through the `log` facade. When logging is enabled in the
//! configuration, [`init`] installs a `fern` dispatcher that appends timestamped
//! lines to `<data dir>/feedlog/feedlog.log`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::{Config, LoggingConfig};
use crate::constants::LOG_FILE_NAME;

/// Install the global logger according to `config`.
///
/// Does nothing when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let path = get_log_file_path()?;
    init_with_path(config, &path)
}

/// Install the global logger writing to `path`.
pub fn init_with_path(config: &LoggingConfig, path: &Path) -> Result<()> {
    let level = config.level_filter()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    dispatch(level)
        .chain(file)
        .apply()
        .context("A global logger is already installed")?;

    log::info!("Logging to {} at level {}", path.display(), level);
    Ok(())
}

/// Base dispatcher shared by every output
fn dispatch(level: log::LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("sea_orm", log::LevelFilter::Warn)
}

/// Get the log file path
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(Config::get_data_dir()?.join(LOG_FILE_NAME))
}
