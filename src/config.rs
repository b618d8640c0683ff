//! Configuration management for feedlog
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DATABASE_FILE_NAME, DEFAULT_BACKUP_UTC_OFFSET_HOURS,
    DEFAULT_HISTORY_LENGTH, DEFAULT_NEXT_FEEDING_HOURS, LOCAL_CONFIG_FILE, MAX_HISTORY_LENGTH, MAX_NEXT_FEEDING_HOURS,
    MAX_UTC_OFFSET_HOURS, MIN_HISTORY_LENGTH, MIN_NEXT_FEEDING_HOURS, MIN_UTC_OFFSET_HOURS,
};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub feeding: FeedingConfig,
    pub display: DisplayConfig,
    pub storage: StorageConfig,
    pub backup: BackupConfig,
    pub logging: LoggingConfig,
}

/// Feeding schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedingConfig {
    /// Hours after the last feeding when the next one is due
    pub next_feeding_hours: u32,
    /// Number of past days included in the history statistics
    pub history_length: u32,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for feeding dates
    pub date_format: String,
    /// Time format for feeding times
    pub time_format: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file. Defaults to the XDG data directory.
    pub database_path: Option<PathBuf>,
    /// Keep everything in memory (nothing survives the process)
    pub in_memory: bool,
}

/// Backup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Directory backups are exported to. Defaults to the download directory.
    pub directory: Option<PathBuf>,
    /// Fixed UTC offset, in hours, used for backup timestamps
    pub utc_offset_hours: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
    /// Log level: error, warn, info, debug or trace
    pub level: String,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            next_feeding_hours: DEFAULT_NEXT_FEEDING_HOURS,
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DATE_FORMAT.to_string(),
            time_format: datetime::TIME_FORMAT.to_string(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            directory: None,
            utc_offset_hours: DEFAULT_BACKUP_UTC_OFFSET_HOURS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level filter
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl StorageConfig {
    /// Resolve the database file location
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::get_data_dir()?.join(DATABASE_FILE_NAME)),
        }
    }
}

impl BackupConfig {
    /// Resolve the directory backups are written to
    pub fn resolve_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.directory {
            return Ok(dir.clone());
        }

        dirs::download_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine backup directory"))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_NAME).join(CONFIG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let hours = self.feeding.next_feeding_hours;
        if !(MIN_NEXT_FEEDING_HOURS..=MAX_NEXT_FEEDING_HOURS).contains(&hours) {
            anyhow::bail!(
                "next_feeding_hours must be between {} and {}, got {}",
                MIN_NEXT_FEEDING_HOURS,
                MAX_NEXT_FEEDING_HOURS,
                hours
            );
        }

        let history = self.feeding.history_length;
        if !(MIN_HISTORY_LENGTH..=MAX_HISTORY_LENGTH).contains(&history) {
            anyhow::bail!(
                "history_length must be between {} and {} days, got {}",
                MIN_HISTORY_LENGTH,
                MAX_HISTORY_LENGTH,
                history
            );
        }

        let offset = self.backup.utc_offset_hours;
        if !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&offset) {
            anyhow::bail!(
                "utc_offset_hours must be between {} and {}, got {}",
                MIN_UTC_OFFSET_HOURS,
                MAX_UTC_OFFSET_HOURS,
                offset
            );
        }

        // Round-trip a known value through the display formats
        let sample_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31)
            .ok_or_else(|| anyhow::anyhow!("Invalid sample date"))?;
        let rendered = render_checked(sample_date.format(&self.display.date_format))
            .ok_or_else(|| anyhow::anyhow!("Invalid date_format '{}'", self.display.date_format))?;
        if let Err(e) = chrono::NaiveDate::parse_from_str(&rendered, &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }

        let sample_time = chrono::NaiveTime::from_hms_opt(12, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid sample time"))?;
        let rendered = render_checked(sample_time.format(&self.display.time_format))
            .ok_or_else(|| anyhow::anyhow!("Invalid time_format '{}'", self.display.time_format))?;
        if let Err(e) = chrono::NaiveTime::parse_from_str(&rendered, &self.display.time_format) {
            anyhow::bail!("Invalid time_format '{}': {}", self.display.time_format, e);
        }

        self.logging.level_filter()?;

        if self.storage.in_memory && self.storage.database_path.is_some() {
            log::warn!("storage.in_memory is set, storage.database_path will be ignored");
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# feedlog Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::ISO_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Get the XDG data directory path
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_NAME))
    }
}

/// Render without panicking on unsupported strftime specifiers
fn render_checked(value: impl std::fmt::Display) -> Option<String> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{}", value).ok().map(|_| out)
}
