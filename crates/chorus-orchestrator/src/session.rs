//! Convenience constructors from a loaded [`ChorusConfig`].

use std::sync::Arc;

use chorus_core::config::ChorusConfig;
use chorus_core::errors::ChorusResult;
use chorus_core::traits::IGenerativeCapability;
use chorus_storage::{InMemoryPreferenceStorage, SqlitePreferenceStorage};

use crate::orchestrator::CommentOrchestrator;

/// Initialize logging from `config.observability` and open a session
/// persisting to the SQLite file at `config.storage.db_path`.
pub fn open_sqlite_session<G: IGenerativeCapability>(
    user_id: &str,
    config: &ChorusConfig,
    capability: G,
) -> ChorusResult<CommentOrchestrator<G, SqlitePreferenceStorage>> {
    chorus_observability::init_from_config(&config.observability);
    let storage = SqlitePreferenceStorage::from_config(&config.storage)?;
    Ok(CommentOrchestrator::new(user_id, config, capability, Arc::new(storage)))
}

/// A session whose preferences live only in this process.
pub fn in_memory_session<G: IGenerativeCapability>(
    user_id: &str,
    config: &ChorusConfig,
    capability: G,
) -> CommentOrchestrator<G, InMemoryPreferenceStorage> {
    CommentOrchestrator::new(
        user_id,
        config,
        capability,
        Arc::new(InMemoryPreferenceStorage::new()),
    )
}
