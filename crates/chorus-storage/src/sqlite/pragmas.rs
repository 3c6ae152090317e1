//! PRAGMA configuration applied to the store's connection.
//!
//! WAL mode, NORMAL sync, configurable busy_timeout.

use rusqlite::Connection;

use chorus_core::errors::ChorusResult;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> ChorusResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {busy_timeout_ms};
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

