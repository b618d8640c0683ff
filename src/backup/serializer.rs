//! JSON backup format.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

use super::BackupError;
use crate::feeding::{Additions, Breast, Feeding};

/// Converts a list of items to and from a backup document.
pub trait Serializer<T> {
    fn serialize(&self, items: &[T]) -> Result<String>;

    fn deserialize(&self, content: &str) -> Result<Vec<T>>;
}

/// One feeding as it appears in a backup file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BackupFeeding {
    id: i32,
    breast: i32,
    additions: i32,
    /// Milliseconds since the Unix epoch
    timestamp: i64,
}

/// Backup serializer for feedings.
///
/// Local feeding times are turned into epoch milliseconds at a fixed UTC offset,
/// and the same offset is applied when reading them back.
#[derive(Debug, Clone, Copy)]
pub struct FeedingSerializer {
    offset: FixedOffset,
}

impl FeedingSerializer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Serializer for a whole-hour UTC offset
    pub fn with_offset_hours(hours: i32) -> Result<Self> {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| BackupError::InvalidData(format!("UTC offset of {} hours is out of range", hours)))?;
        Ok(Self::new(offset))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn to_backup(&self, feeding: &Feeding) -> Result<BackupFeeding> {
        let timestamp = self
            .offset
            .from_local_datetime(&feeding.date_time())
            .single()
            .ok_or_else(|| BackupError::InvalidData(format!("Ambiguous feeding time {}", feeding.date_time())))?
            .timestamp_millis();

        Ok(BackupFeeding {
            id: feeding.id.unwrap_or(0),
            breast: feeding.breast.flags(),
            additions: feeding.additions.bits(),
            timestamp,
        })
    }

    fn from_backup(&self, backup: BackupFeeding) -> Result<Feeding> {
        let local = DateTime::from_timestamp_millis(backup.timestamp)
            .ok_or_else(|| BackupError::InvalidData(format!("Timestamp {} is out of range", backup.timestamp)))?
            .with_timezone(&self.offset)
            .naive_local();

        let mut feeding = Feeding::new(
            local.date(),
            local.time(),
            Breast::from_flags(backup.breast),
            Additions::from_bits_truncate(backup.additions),
        );
        feeding.id = (backup.id > 0).then_some(backup.id);
        Ok(feeding)
    }
}

impl Serializer<Feeding> for FeedingSerializer {
    fn serialize(&self, items: &[Feeding]) -> Result<String> {
        let backups = items
            .iter()
            .map(|feeding| self.to_backup(feeding))
            .collect::<Result<Vec<_>>>()?;

        serde_json::to_string(&backups).context("Failed to serialize feedings")
    }

    fn deserialize(&self, content: &str) -> Result<Vec<Feeding>> {
        let backups: Vec<BackupFeeding> = serde_json::from_str(content).context("Failed to parse backup content")?;

        backups.into_iter().map(|backup| self.from_backup(backup)).collect()
    }
}
