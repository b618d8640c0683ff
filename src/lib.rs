//! feedlog - a command line feeding log
//!
//! Records breast-feedings with the side used and any supplements given,
//! shows when the next feeding is due, summarizes the intervals between
//! feedings per day, and exports/imports JSON backups.
//!
//! # Modules
//!
//! * [`utils`] - Date/time display patterns, the clock abstraction and
//!   `YYYYMMDD` / `HHMM` integer packing
//! * [`feeding`] - Feeding domain types, next-feeding summary and statistics
//! * [`storage`] - SQLite storage
//! * [`tracker`] - Service used by the command line
//! * [`backup`] - Backup export and import
//! * [`config`] - Application configuration management

/// Backup export and import
pub mod backup;

/// Command line parsing and execution
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Feeding domain types
pub mod feeding;

/// File logging setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Local SQLite storage
pub mod storage;

/// Feeding tracker service
pub mod tracker;

/// Utility functions for date/time handling
pub mod utils;
