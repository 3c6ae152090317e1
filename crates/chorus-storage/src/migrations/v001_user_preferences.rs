//! v001: user_preferences.

use rusqlite::Connection;

use chorus_core::errors::ChorusResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ChorusResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user_preferences (
            user_id       TEXT PRIMARY KEY,
            role_weights  TEXT NOT NULL,
            session_count INTEGER NOT NULL DEFAULT 0,
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
