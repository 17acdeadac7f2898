//! # Key-Value Storage
//!
//! Durable local key-value storage backed by SQLite.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              collections (single table)                             │
//! │                                                                     │
//! │  key               │ value                                          │
//! │  ──────────────────┼─────────────────────────────────────────────   │
//! │  crm-customers     │ [{"id":"1","name":"João Silva",...}, ...]      │
//! │  supplies          │ [{"id":"1","name":"Tinta Preta DTF",...}, ...] │
//! │  supply-purchases  │ [...]                                          │
//! │  tube-models       │ [...]                                          │
//! │  products          │ [...]                                          │
//! │  sellers           │ [...]                                          │
//! │  payment-keys      │ [...]                                          │
//! │  print-orders      │ [...]                                          │
//! │                                                                     │
//! │  One JSON-serialized array per collection; every write replaces     │
//! │  the whole value (last write wins).                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled for better crash recovery; the
//! write pattern is tiny whole-value upserts, so contention is a non-issue
//! for a single-user tool.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

// =============================================================================
// Configuration
// =============================================================================

/// Key-value storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/grafica.db");
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (one writer, one reader is already generous here)
    pub max_connections: u32,

    /// Connection timeout duration.
    pub connect_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration with the given path. The file is created on
    /// first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// In-memory SQLite lives and dies with its single connection, so the
    /// pool is pinned to exactly one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == PathBuf::from(":memory:")
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the key-value storage.
///
/// Cheap to clone (wraps a pool); the [`Store`](crate::Store) holds one and
/// tests may keep a second clone to reopen the same storage.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the storage and ensures the collections
    /// table exists.
    pub async fn new(config: DbConfig) -> Result<Self, sqlx::Error> {
        info!(
            path = %config.database_path.display(),
            "opening key-value storage"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                // WAL: better crash recovery for a file that is rewritten
                // on every mutation
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout);

        if config.is_in_memory() {
            // An idle-closed connection would drop the whole database.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(connect_options).await?;

        let db = Database { pool };
        db.init_schema().await?;

        debug!("key-value storage ready");
        Ok(db)
    }

    /// Creates the collections table when missing. Idempotent.
    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS collections (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Reads the raw JSON value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(json))` - the collection has been persisted before
    /// * `Ok(None)` - first run, caller falls back to seed data
    pub async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT value FROM collections WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }

    /// Writes the raw JSON value under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        debug!(key = %key, bytes = value.len(), "persisting collection");
        sqlx::query(
            "INSERT INTO collections (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Checks that the storage can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool. Call on application shutdown.
    pub async fn close(&self) {
        info!("closing key-value storage");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_storage() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.get("supplies").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.put("supplies", r#"[{"id":"1"}]"#).await.unwrap();
        assert_eq!(
            db.get("supplies").await.unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[tokio::test]
    async fn test_put_replaces_previous_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.put("print-orders", "[1]").await.unwrap();
        db.put("print-orders", "[1,2]").await.unwrap();
        assert_eq!(db.get("print-orders").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.put("supplies", "[1]").await.unwrap();
        db.put("sellers", "[2]").await.unwrap();
        assert_eq!(db.get("supplies").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(db.get("sellers").await.unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/grafica.db").max_connections(4);
        assert_eq!(config.max_connections, 4);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
