//! # chorus-storage
//!
//! [`IPreferenceStorage`](chorus_core::traits::IPreferenceStorage)
//! implementations: a shared in-memory map and a single-file SQLite store.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::InMemoryPreferenceStorage;
pub use sqlite::SqlitePreferenceStorage;

use chorus_core::errors::{ChorusError, StorageError};

/// Map a rusqlite (or other backend) message into a storage error.
pub(crate) fn to_storage_err(message: String) -> ChorusError {
    ChorusError::Storage(StorageError::Sqlite { message })
}
