use std::path::Path;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::config::StorageConfig;
use crate::entities::feeding;

/// SQLite URL of a private in-memory database
const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Local storage manager for the feeding log
pub struct LocalStorage {
    pub(crate) conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open the database described by the storage configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        if config.in_memory {
            Self::in_memory().await
        } else {
            let path = config.resolve_database_path()?;
            Self::open(&path).await
        }
    }

    /// Open a throwaway in-memory database
    pub async fn in_memory() -> Result<Self> {
        // Every pooled connection would get its own empty memory database
        let mut options = ConnectOptions::new(MEMORY_DATABASE_URL.to_string());
        options.min_connections(1).max_connections(1).sqlx_logging(false);

        Self::connect(options).await
    }

    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let mut options = ConnectOptions::new(url);
        options.max_connections(4).sqlx_logging(false);

        log::info!("Opening feeding database at {}", path.display());
        Self::connect(options).await
    }

    async fn connect(options: ConnectOptions) -> Result<Self> {
        let conn = Database::connect(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(feeding::Entity);
        table.if_not_exists();
        self.conn
            .execute(backend.build(&table))
            .await
            .context("Failed to create feedings table")?;

        for mut index in schema.create_index_from_entity(feeding::Entity) {
            index.if_not_exists();
            self.conn
                .execute(backend.build(&index))
                .await
                .context("Failed to create feedings index")?;
        }

        Ok(())
    }

    /// Underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Delete every stored feeding
    pub async fn clear_all_data(&self) -> Result<()> {
        use sea_orm::EntityTrait;
        feeding::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
