//! Backup export and import.
//!
//! [`BackupManager`] writes every stored feeding to a JSON file and reads such a
//! file back into storage. Only one job runs at a time; the current
//! [`BackupState`] can be observed through [`BackupManager::subscribe`].

pub mod serializer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

use crate::constants::{BACKUP_FILE_EXTENSION, BACKUP_FILE_PREFIX};
use crate::feeding::Feeding;
use crate::repositories::FeedingRepository;
use crate::storage::LocalStorage;
use crate::utils::Clock;

pub use serializer::{FeedingSerializer, Serializer};

/// Errors specific to backup jobs.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Another backup job is already running")]
    Busy,

    #[error("Invalid backup data: {0}")]
    InvalidData(String),
}

/// What the backup manager is doing right now
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackupState {
    #[default]
    Idle,
    Importing {
        file_name: String,
    },
    Exporting {
        file_name: String,
    },
}

impl BackupState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Result of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A new backup file was written
    Written { path: PathBuf, count: usize },
    /// A file with the generated name already existed and was left untouched
    AlreadyExists { path: PathBuf },
}

/// Backup file name for the clock's current time: `kApp_<hour>_<minute>_<day>_<month>.txt`
pub fn backup_file_name<C: Clock + ?Sized>(clock: &C) -> String {
    use chrono::{Datelike, Timelike};

    let now = clock.now();
    format!(
        "{}_{}_{}_{}_{}.{}",
        BACKUP_FILE_PREFIX,
        now.hour(),
        now.minute(),
        now.day(),
        now.month(),
        BACKUP_FILE_EXTENSION
    )
}

/// Resets the state to idle when a job ends, however it ends
pub(crate) struct JobGuard<'a> {
    state: &'a watch::Sender<BackupState>,
}

impl Drop for JobGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(BackupState::Idle);
    }
}

/// Runs backup export and import jobs against local storage.
pub struct BackupManager {
    storage: Arc<LocalStorage>,
    serializer: FeedingSerializer,
    clock: Arc<dyn Clock>,
    state: watch::Sender<BackupState>,
}

impl BackupManager {
    pub fn new(storage: Arc<LocalStorage>, serializer: FeedingSerializer, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(BackupState::Idle);
        Self {
            storage,
            serializer,
            clock,
            state,
        }
    }

    /// Current state
    pub fn state(&self) -> BackupState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<BackupState> {
        self.state.subscribe()
    }

    /// Claim the manager for a job, failing if another one is running
    pub(crate) fn begin(&self, next: BackupState) -> Result<JobGuard<'_>, BackupError> {
        let claimed = self.state.send_if_modified(|state| {
            if state.is_idle() {
                *state = next;
                true
            } else {
                false
            }
        });

        if claimed {
            Ok(JobGuard { state: &self.state })
        } else {
            log::warn!("Trying to start a backup job while another one is running");
            Err(BackupError::Busy)
        }
    }

    /// Export every stored feeding to a new file in `dir`.
    pub async fn export(&self, dir: &Path) -> Result<ExportOutcome> {
        let file_name = backup_file_name(self.clock.as_ref());
        let _job = self.begin(BackupState::Exporting {
            file_name: file_name.clone(),
        })?;
        log::debug!("Exporting feedings to {}", file_name);

        let feedings = FeedingRepository::get_all(self.storage.connection()).await?;
        let content = self.serializer.serialize(&feedings)?;

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;

        let path = dir.join(&file_name);
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                log::warn!("Backup file {} already exists, ignored", path.display());
                return Ok(ExportOutcome::AlreadyExists { path });
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create backup file: {}", path.display()));
            }
        };

        file.write_all(content.as_bytes())
            .await
            .with_context(|| format!("Failed to write backup file: {}", path.display()))?;
        file.flush().await?;

        log::info!("Exported {} feedings to {}", feedings.len(), path.display());
        Ok(ExportOutcome::Written {
            path,
            count: feedings.len(),
        })
    }

    /// Import feedings from a backup file, returning how many were stored.
    pub async fn import(&self, path: &Path) -> Result<usize> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _job = self.begin(BackupState::Importing { file_name })?;
        log::debug!("Importing feedings from {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read backup file: {}", path.display()))?;

        let feedings: Vec<Feeding> = self.serializer.deserialize(&content)?;
        if feedings.is_empty() {
            log::info!("Import of {} was empty", path.display());
            return Ok(0);
        }

        let count = FeedingRepository::insert_many(self.storage.connection(), &feedings).await?;
        log::info!("Imported {} feedings from {}", count, path.display());
        Ok(count)
    }
}
