//! Schema migrations tracked through `PRAGMA user_version`.

mod v001_user_preferences;

use rusqlite::Connection;
use tracing::info;

use chorus_core::errors::{ChorusResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> ChorusResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_user_preferences::migrate)];

/// Schema version after all migrations ran.
pub const LATEST_VERSION: u32 = 1;

pub fn current_version(conn: &Connection) -> ChorusResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the stored schema version.
pub fn run_migrations(conn: &Connection) -> ChorusResult<u32> {
    let mut version = current_version(conn)?;
    for (target, migrate) in MIGRATIONS {
        if *target <= version {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: *target,
            reason: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", target)
            .map_err(|e| to_storage_err(e.to_string()))?;
        info!(version = target, "migration applied");
        version = *target;
    }
    Ok(version)
}
