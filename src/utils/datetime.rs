//! Date and time formatting helpers and the clock abstraction
//!
//! Feedings are shown as `dd.MM. yyyy` / `HH:mm` (e.g. `10.06. 2023` and `09:05`).
//! Anything that needs "now" takes a [`Clock`] instead of reading the wall clock
//! directly, so the same code runs against a [`FixedClock`] in tests.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Display format for dates (`dd.MM. yyyy`)
pub const DATE_FORMAT: &str = "%d.%m. %Y";

/// Display format for times (`HH:mm`, 24-hour, zero padded)
pub const TIME_FORMAT: &str = "%H:%M";

/// Format accepted for dates given on the command line
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Pattern used to render dates for display.
pub fn date_formatter() -> &'static str {
    DATE_FORMAT
}

/// Pattern used to render times for display.
pub fn time_formatter() -> &'static str {
    TIME_FORMAT
}

/// Format a date with the default display pattern
pub fn format_date(date: NaiveDate) -> String {
    format_date_with(date, date_formatter())
}

/// Format a time with the default display pattern
pub fn format_time(time: NaiveTime) -> String {
    format_time_with(time, time_formatter())
}

/// Format a date with a caller supplied strftime pattern
pub fn format_date_with(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// Format a time with a caller supplied strftime pattern
pub fn format_time_with(time: NaiveTime, pattern: &str) -> String {
    time.format(pattern).to_string()
}

/// Parse a date string in YYYY-MM-DD format to NaiveDate
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// * `Result<NaiveDate, chrono::ParseError>` - Parsed date or parse error
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, ISO_DATE_FORMAT)
}

/// Render a duration as `H:MM`. Negative durations are clamped to zero.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current local date-time
    fn now(&self) -> NaiveDateTime;

    /// Current local date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Current local time of day
    fn time(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Clock backed by the system's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
