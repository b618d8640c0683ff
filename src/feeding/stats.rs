//! Per-day statistics of the intervals between feedings.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};

use super::Feeding;

/// Interval statistics for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatistics {
    pub date: NaiveDate,
    pub feeding_count: usize,
    pub average_interval: Duration,
    pub max_interval: Duration,
}

/// Compute statistics for the `limit` most recent days strictly before `before`,
/// newest first.
///
/// Intervals are measured between consecutive feedings of the same day, so a
/// day needs at least two feedings to show up.
pub fn day_statistics(feedings: &[Feeding], before: NaiveDate, limit: usize) -> Vec<DayStatistics> {
    let mut by_date: BTreeMap<NaiveDate, Vec<NaiveTime>> = BTreeMap::new();
    for feeding in feedings.iter().filter(|f| f.date < before) {
        by_date.entry(feeding.date).or_default().push(feeding.time);
    }

    by_date
        .into_iter()
        .rev()
        .filter_map(|(date, times)| summarize_day(date, times))
        .take(limit)
        .collect()
}

fn summarize_day(date: NaiveDate, mut times: Vec<NaiveTime>) -> Option<DayStatistics> {
    times.sort();

    let intervals: Vec<Duration> = times.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let max_interval = intervals.iter().max().copied()?;
    let total = intervals.iter().fold(Duration::zero(), |acc, interval| acc + *interval);

    Some(DayStatistics {
        date,
        feeding_count: times.len(),
        average_interval: total / intervals.len() as i32,
        max_interval,
    })
}
