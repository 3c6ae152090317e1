//! Process-local preference store.

use std::sync::Arc;

use dashmap::DashMap;

use chorus_core::errors::ChorusResult;
use chorus_core::models::UserPreferences;
use chorus_core::traits::IPreferenceStorage;

/// DashMap-backed store. Clones share the same map, so one instance can be
/// handed to several components.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStorage {
    records: Arc<DashMap<String, UserPreferences>>,
}

impl InMemoryPreferenceStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IPreferenceStorage for InMemoryPreferenceStorage {
    async fn get(&self, user_id: &str) -> ChorusResult<Option<UserPreferences>> {
        Ok(self.records.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> ChorusResult<()> {
        self.records.insert(user_id.to_string(), preferences.clone());
        Ok(())
    }
}
