//! Last feeding and the next one it implies.

use chrono::{Duration, NaiveDateTime};

use super::{Additions, Breast, Feeding};
use crate::utils::{datetime, Clock};

/// Summary of the most recent feeding.
///
/// Without any recorded feeding the summary is anchored to the clock's current
/// time and reports [`LastFeeding::is_empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastFeeding {
    feeding: Feeding,
    next_feeding: NaiveDateTime,
    is_empty: bool,
}

impl LastFeeding {
    pub fn new<C: Clock + ?Sized>(last: Option<Feeding>, next_feeding_hours: u32, clock: &C) -> Self {
        let (feeding, is_empty) = match last {
            Some(feeding) => (feeding, false),
            None => {
                let now = clock.now();
                (Feeding::new(now.date(), now.time(), Breast::Unknown, Additions::NONE), true)
            }
        };

        let next_feeding = feeding.date_time() + Duration::hours(i64::from(next_feeding_hours));

        Self {
            feeding,
            next_feeding,
            is_empty,
        }
    }

    pub fn feeding(&self) -> &Feeding {
        &self.feeding
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn next_feeding(&self) -> NaiveDateTime {
        self.next_feeding
    }

    /// True when the next feeding falls on a later day than the last one
    pub fn is_next_feeding_tomorrow(&self) -> bool {
        self.next_feeding.date() > self.feeding.date
    }

    pub fn breast(&self) -> Breast {
        self.feeding.breast
    }

    pub fn has_probiotics(&self) -> bool {
        self.feeding.additions.contains(Additions::PROBIOTICS)
    }

    pub fn has_vigantol(&self) -> bool {
        self.feeding.additions.contains(Additions::VIGANTOL)
    }

    pub fn has_espumisan(&self) -> bool {
        self.feeding.additions.contains(Additions::ESPUMISAN)
    }

    pub fn date_label(&self, pattern: &str) -> String {
        datetime::format_date_with(self.feeding.date, pattern)
    }

    pub fn time_label(&self, pattern: &str) -> String {
        datetime::format_time_with(self.feeding.time, pattern)
    }

    pub fn next_feeding_label(&self, pattern: &str) -> String {
        datetime::format_time_with(self.next_feeding.time(), pattern)
    }
}
