//! Utility modules for feedlog.
//!
//! # Available Utilities
//!
//! - [`datetime`] - Display patterns for dates and times plus the [`datetime::Clock`] abstraction
//! - [`packed`] - Packing dates into `YYYYMMDD` and times into `HHMM` integers
//!
//! Everything in here is pure apart from [`datetime::SystemClock`], which reads
//! the local wall clock.

pub mod datetime;
pub mod packed;

pub use datetime::{Clock, FixedClock, SystemClock};
pub use packed::{PackError, PackedDate, PackedTime};
