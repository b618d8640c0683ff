//! Constants used throughout the application
//!
//! This module centralizes file names, default settings and user facing text.

// Names
pub const APP_NAME: &str = "feedlog";
pub const LOCAL_CONFIG_FILE: &str = "feedlog.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "feedlog.db";
pub const LOG_FILE_NAME: &str = "feedlog.log";
pub const BACKUP_FILE_PREFIX: &str = "kApp";
pub const BACKUP_FILE_EXTENSION: &str = "txt";

// Feeding defaults
/// Hours between a feeding and the next expected one
pub const DEFAULT_NEXT_FEEDING_HOURS: u32 = 2;
pub const MIN_NEXT_FEEDING_HOURS: u32 = 1;
pub const MAX_NEXT_FEEDING_HOURS: u32 = 24;
/// Number of past days shown in the history view
pub const DEFAULT_HISTORY_LENGTH: u32 = 5;
pub const MIN_HISTORY_LENGTH: u32 = 1;
pub const MAX_HISTORY_LENGTH: u32 = 365;

// Backup defaults
/// UTC offset used to turn local feeding times into backup timestamps
pub const DEFAULT_BACKUP_UTC_OFFSET_HOURS: i32 = 2;
pub const MIN_UTC_OFFSET_HOURS: i32 = -12;
pub const MAX_UTC_OFFSET_HOURS: i32 = 14;

// Success Messages
pub const SUCCESS_FEEDING_RECORDED: &str = "✅ Feeding recorded";
pub const SUCCESS_EXPORTED: &str = "✅ Feedings exported to";
pub const SUCCESS_IMPORTED: &str = "✅ Feedings imported from";
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// Error Messages
pub const ERROR_UNKNOWN_COMMAND: &str = "❌ Unknown command";
pub const ERROR_MISSING_ARGUMENT: &str = "❌ Missing argument";

// Labels
pub const LABEL_UNKNOWN: &str = "<Unknown>";
pub const LABEL_NO_FEEDINGS: &str = "No feedings recorded yet";
pub const LABEL_NO_HISTORY: &str = "No history available";
