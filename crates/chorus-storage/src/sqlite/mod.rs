//! SQLite preference store: one row per user in `user_preferences`.

pub mod pragmas;
pub mod write_connection;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use chorus_core::config::StorageConfig;
use chorus_core::errors::{ChorusResult, StorageError};
use chorus_core::models::{RoleWeights, UserPreferences};
use chorus_core::traits::IPreferenceStorage;

use crate::migrations;
use crate::to_storage_err;

pub use write_connection::WriteConnection;

pub struct SqlitePreferenceStorage {
    writer: WriteConnection,
    db_path: Option<PathBuf>,
}

impl SqlitePreferenceStorage {
    /// Open (creating if needed) the database file and run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> ChorusResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, config, Some(path.to_path_buf()))
    }

    /// Open the file named by `config.db_path`.
    pub fn from_config(config: &StorageConfig) -> ChorusResult<Self> {
        Self::open(Path::new(&config.db_path), config)
    }

    /// Private in-memory database (for testing).
    pub fn open_in_memory() -> ChorusResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, &StorageConfig::default(), None)
    }

    fn initialize(conn: Connection, config: &StorageConfig, db_path: Option<PathBuf>) -> ChorusResult<Self> {
        pragmas::apply_pragmas(&conn, config.busy_timeout_ms)?;
        let version = migrations::run_migrations(&conn)?;
        debug!(?db_path, schema_version = version, "preference database ready");
        Ok(Self {
            writer: WriteConnection::new(conn),
            db_path,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub async fn schema_version(&self) -> ChorusResult<u32> {
        self.writer.with_conn(migrations::current_version).await
    }

    pub async fn user_count(&self) -> ChorusResult<usize> {
        self.writer
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM user_preferences", [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|count| count.max(0) as usize)
                .map_err(|e| to_storage_err(e.to_string()))
            })
            .await
    }

    /// Raw write used by tests and tooling to plant arbitrary rows.
    pub async fn put_raw(
        &self,
        user_id: &str,
        role_weights_json: &str,
        session_count: u32,
    ) -> ChorusResult<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.writer
            .with_conn(|conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO user_preferences (user_id, role_weights, session_count, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![user_id, role_weights_json, session_count, updated_at],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                Ok(())
            })
            .await
    }
}

impl IPreferenceStorage for SqlitePreferenceStorage {
    async fn get(&self, user_id: &str) -> ChorusResult<Option<UserPreferences>> {
        self.writer
            .with_conn(|conn| {
                let row = conn
                    .query_row(
                        "SELECT role_weights, session_count, updated_at
                         FROM user_preferences WHERE user_id = ?1",
                        params![user_id],
                        |row| {
                            Ok((
                                row.get::<_, String>(0)?,
                                row.get::<_, u32>(1)?,
                                row.get::<_, String>(2)?,
                            ))
                        },
                    )
                    .optional()
                    .map_err(|e| to_storage_err(e.to_string()))?;
                row.map(|(weights, session_count, updated_at)| {
                    decode_row(user_id, &weights, session_count, &updated_at)
                })
                .transpose()
            })
            .await
    }

    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> ChorusResult<()> {
        let weights = serde_json::to_string(&preferences.role_weights)?;
        let updated_at = preferences.updated_at.to_rfc3339();
        let session_count = preferences.session_count;
        self.writer
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO user_preferences (user_id, role_weights, session_count, updated_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(user_id) DO UPDATE SET
                        role_weights = excluded.role_weights,
                        session_count = excluded.session_count,
                        updated_at = excluded.updated_at",
                    params![user_id, weights, session_count, updated_at],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                Ok(())
            })
            .await
    }
}

fn decode_row(
    user_id: &str,
    weights: &str,
    session_count: u32,
    updated_at: &str,
) -> ChorusResult<UserPreferences> {
    let role_weights: RoleWeights =
        serde_json::from_str(weights).map_err(|e| StorageError::CorruptRecord {
            user_id: user_id.to_string(),
            details: format!("role_weights: {e}"),
        })?;
    let updated_at = DateTime::parse_from_rfc3339(updated_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRecord {
            user_id: user_id.to_string(),
            details: format!("updated_at: {e}"),
        })?;
    Ok(UserPreferences {
        user_id: user_id.to_string(),
        role_weights,
        session_count,
        updated_at,
    })
}
