/// Durable-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt record for user {user_id}: {details}")]
    CorruptRecord { user_id: String, details: String },
}
