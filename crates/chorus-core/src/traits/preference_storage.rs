use crate::errors::ChorusResult;
use crate::models::UserPreferences;

/// Durable key-value store for per-user preferences.
///
/// Assumed eventually consistent with a single writer per key in practice;
/// concurrent writers for the same user are last-write-wins.
#[allow(async_fn_in_trait)]
pub trait IPreferenceStorage: Send + Sync {
    /// Load a user's preferences, `None` if never stored.
    async fn get(&self, user_id: &str) -> ChorusResult<Option<UserPreferences>>;

    /// Replace a user's preferences.
    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> ChorusResult<()>;
}
