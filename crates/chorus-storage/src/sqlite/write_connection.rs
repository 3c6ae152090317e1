//! Single connection behind `tokio::sync::Mutex`. Serialized access.

use rusqlite::Connection;
use tokio::sync::Mutex;

use chorus_core::errors::ChorusResult;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Acquire the lock and run `f` with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> ChorusResult<T>
    where
        F: FnOnce(&Connection) -> ChorusResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }
}
