//! Integer packing of dates and times
//!
//! Dates are stored as `YYYYMMDD` (`day + month * 100 + year * 10000`) and times
//! as `HHMM` (`hour * 100 + minute`). Both orderings follow the chronological
//! order, so packed columns can be compared and range-filtered directly.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::datetime::{self, Clock};

/// Smallest year that still packs into a `YYYYMMDD` integer
pub const MIN_YEAR: i32 = 0;
/// Largest year that still packs into a `YYYYMMDD` integer
pub const MAX_YEAR: i32 = 9999;

/// Errors produced while packing or unpacking dates and times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("Invalid date: {0} is not a packed YYYYMMDD calendar date")]
    InvalidDate(i32),

    #[error("Invalid time: {0} is not a packed HHMM time of day")]
    InvalidTime(i32),

    #[error("Year {0} cannot be packed, supported range is 0..=9999")]
    YearOutOfRange(i32),
}

/// Pack a calendar date into `YYYYMMDD`.
///
/// # Errors
/// Returns [`PackError::YearOutOfRange`] when the year has more than four digits
/// or is negative, since such a date would not unpack to itself.
pub fn encode_date(date: NaiveDate) -> Result<i32, PackError> {
    let year = date.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PackError::YearOutOfRange(year));
    }

    Ok(pack_date(date))
}

fn pack_date(date: NaiveDate) -> i32 {
    date.day() as i32 + date.month() as i32 * 100 + date.year() * 10_000
}

/// Pack the clock's current date into `YYYYMMDD`.
pub fn encode_today<C: Clock + ?Sized>(clock: &C) -> Result<i32, PackError> {
    encode_date(clock.today())
}

/// Unpack a `YYYYMMDD` integer into a calendar date.
///
/// # Errors
/// Returns [`PackError::InvalidDate`] if the digits do not form a real date,
/// e.g. month 13, day 32 or 30 February.
pub fn decode_date(packed: i32) -> Result<NaiveDate, PackError> {
    if packed < 0 {
        return Err(PackError::InvalidDate(packed));
    }

    let year = packed / 10_000;
    let month = (packed - year * 10_000) / 100;
    let day = packed - year * 10_000 - month * 100;

    if year > MAX_YEAR {
        return Err(PackError::InvalidDate(packed));
    }

    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or(PackError::InvalidDate(packed))
}

/// Pack a time of day into `HHMM`. Seconds and below are dropped.
pub fn encode_time(time: NaiveTime) -> i32 {
    time.hour() as i32 * 100 + time.minute() as i32
}

/// Pack the clock's current time of day into `HHMM`.
pub fn encode_now<C: Clock + ?Sized>(clock: &C) -> i32 {
    encode_time(clock.time())
}

/// Unpack an `HHMM` integer into a time of day.
///
/// # Errors
/// Returns [`PackError::InvalidTime`] if the hour exceeds 23 or the minute exceeds 59.
pub fn decode_time(packed: i32) -> Result<NaiveTime, PackError> {
    if packed < 0 {
        return Err(PackError::InvalidTime(packed));
    }

    let hour = packed / 100;
    let minute = packed % 100;

    NaiveTime::from_hms_opt(hour as u32, minute as u32, 0).ok_or(PackError::InvalidTime(packed))
}

/// Drop seconds and sub-second precision from a time of day
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(time)
}

/// A calendar date known to round-trip through `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct PackedDate(NaiveDate);

impl PackedDate {
    /// Packed `YYYYMMDD` value
    pub fn value(&self) -> i32 {
        pack_date(self.0)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<i32> for PackedDate {
    type Error = PackError;

    fn try_from(packed: i32) -> Result<Self, Self::Error> {
        decode_date(packed).map(Self)
    }
}

impl TryFrom<NaiveDate> for PackedDate {
    type Error = PackError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        encode_date(date).map(|_| Self(date))
    }
}

impl From<PackedDate> for i32 {
    fn from(date: PackedDate) -> Self {
        date.value()
    }
}

impl From<PackedDate> for NaiveDate {
    fn from(date: PackedDate) -> Self {
        date.0
    }
}

impl fmt::Display for PackedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&datetime::format_date(self.0))
    }
}

/// A minute-precision time of day known to round-trip through `HHMM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct PackedTime(NaiveTime);

impl PackedTime {
    /// Packed `HHMM` value
    pub fn value(&self) -> i32 {
        encode_time(self.0)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl TryFrom<i32> for PackedTime {
    type Error = PackError;

    fn try_from(packed: i32) -> Result<Self, Self::Error> {
        decode_time(packed).map(Self)
    }
}

impl From<NaiveTime> for PackedTime {
    fn from(time: NaiveTime) -> Self {
        Self(truncate_to_minute(time))
    }
}

impl From<PackedTime> for i32 {
    fn from(time: PackedTime) -> Self {
        time.value()
    }
}

impl From<PackedTime> for NaiveTime {
    fn from(time: PackedTime) -> Self {
        time.0
    }
}

impl fmt::Display for PackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&datetime::format_time(self.0))
    }
}
