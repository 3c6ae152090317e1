use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashMap;

use chorus_core::errors::{ChorusResult, StorageError};
use chorus_core::models::UserPreferences;
use chorus_core::traits::IPreferenceStorage;

/// Preference store that fails every call while `failing` is set, and
/// otherwise behaves like a plain in-memory map.
#[derive(Debug, Default)]
pub struct FailingStorage {
    records: DashMap<String, UserPreferences>,
    failing: AtomicBool,
    puts: AtomicUsize,
}

impl FailingStorage {
    /// A store that starts out failing.
    pub fn new() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn stored(&self, user_id: &str) -> Option<UserPreferences> {
        self.records.get(user_id).map(|r| r.value().clone())
    }

    fn check(&self) -> ChorusResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "scripted outage".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl IPreferenceStorage for FailingStorage {
    async fn get(&self, user_id: &str) -> ChorusResult<Option<UserPreferences>> {
        self.check()?;
        Ok(self.stored(user_id))
    }

    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> ChorusResult<()> {
        self.check()?;
        self.records.insert(user_id.to_string(), preferences.clone());
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
