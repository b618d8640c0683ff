//! Feeding tracker service.
//!
//! [`FeedingTracker`] is the data layer the command line talks to. It combines
//! local storage, the feeding settings and a [`Clock`] so that "now" and
//! "today" come from one injectable place.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use crate::backup::{BackupManager, FeedingSerializer};
use crate::config::Config;
use crate::feeding::{self, DayStatistics, Feeding, LastFeeding, NewFeeding};
use crate::repositories::FeedingRepository;
use crate::storage::LocalStorage;
use crate::utils::Clock;

/// Service for recording and querying feedings.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use feedlog::config::Config;
/// use feedlog::feeding::NewFeeding;
/// use feedlog::storage::LocalStorage;
/// use feedlog::tracker::FeedingTracker;
/// use feedlog::utils::SystemClock;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let storage = Arc::new(LocalStorage::in_memory().await?);
/// let tracker = FeedingTracker::new(storage, &config, Arc::new(SystemClock))?;
///
/// tracker.record(NewFeeding { left: true, ..Default::default() }).await?;
/// let last = tracker.last_feeding().await?;
/// println!("next feeding at {}", last.next_feeding());
/// # Ok(())
/// # }
/// ```
///
/// Clones share storage and the backup manager, so at most one backup job
/// runs per tracker.
#[derive(Clone)]
pub struct FeedingTracker {
    storage: Arc<LocalStorage>,
    clock: Arc<dyn Clock>,
    backup: Arc<BackupManager>,
    next_feeding_hours: u32,
    history_length: u32,
}

impl FeedingTracker {
    /// Fails when the configured backup UTC offset is out of range.
    pub fn new(storage: Arc<LocalStorage>, config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let serializer = FeedingSerializer::with_offset_hours(config.backup.utc_offset_hours)?;
        let backup = Arc::new(BackupManager::new(Arc::clone(&storage), serializer, Arc::clone(&clock)));

        Ok(Self {
            storage,
            clock,
            backup,
            next_feeding_hours: config.feeding.next_feeding_hours,
            history_length: config.feeding.history_length,
        })
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    /// Record a feeding stamped with the current time.
    pub async fn record(&self, new_feeding: NewFeeding) -> Result<Feeding> {
        let feeding = new_feeding.at(self.clock.as_ref());
        let stored = FeedingRepository::insert(self.storage.connection(), &feeding).await?;
        log::info!(
            "Recorded feeding on {} at {} ({})",
            stored.date,
            stored.time,
            stored.breast
        );
        Ok(stored)
    }

    /// Feedings recorded today, latest first.
    pub async fn today(&self) -> Result<Vec<Feeding>> {
        self.on_date(self.clock.today()).await
    }

    /// Feedings recorded on `date`, latest first.
    pub async fn on_date(&self, date: NaiveDate) -> Result<Vec<Feeding>> {
        FeedingRepository::get_by_date(self.storage.connection(), date).await
    }

    /// Summary of the most recent feeding and when the next one is due.
    pub async fn last_feeding(&self) -> Result<LastFeeding> {
        let last = FeedingRepository::get_last(self.storage.connection()).await?;
        Ok(LastFeeding::new(last, self.next_feeding_hours, self.clock.as_ref()))
    }

    /// Interval statistics for the configured number of days before today.
    pub async fn history(&self) -> Result<Vec<DayStatistics>> {
        let today = self.clock.today();
        let feedings = FeedingRepository::get_before(self.storage.connection(), today).await?;
        Ok(feeding::day_statistics(&feedings, today, self.history_length as usize))
    }

    /// Every stored feeding in chronological order.
    pub async fn all(&self) -> Result<Vec<Feeding>> {
        FeedingRepository::get_all(self.storage.connection()).await
    }

    /// Remove a feeding by id.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let removed = FeedingRepository::delete(self.storage.connection(), id).await?;
        if removed {
            log::info!("Deleted feeding {}", id);
        }
        Ok(removed)
    }

    /// Backup manager sharing this tracker's storage and clock.
    pub fn backup_manager(&self) -> &BackupManager {
        &self.backup
    }
}
