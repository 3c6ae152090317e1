//! Cached per-user preferences backed by a durable store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use chorus_core::config::LearningConfig;
use chorus_core::errors::{ChorusError, ChorusResult};
use chorus_core::models::{FeedbackKind, RoleType, RoleWeights, UserPreferences};
use chorus_core::traits::IPreferenceStorage;

use crate::stats::LearningStats;
use crate::weights::{self, WeightBounds};

/// Result of one applied feedback signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub role: RoleType,
    pub kind: FeedbackKind,
    pub delta: f64,
    pub previous_weight: f64,
    pub new_weight: f64,
    /// False when the write to the durable store failed.
    pub persisted: bool,
}

#[derive(Debug)]
struct UserState {
    preferences: UserPreferences,
    stats: LearningStats,
    /// False while the durable record could not be read. Nothing is written
    /// for this user until a later read succeeds.
    loaded: bool,
}

/// In-memory weight cache in front of an [`IPreferenceStorage`].
///
/// Storage failures never surface: the store keeps working on its in-memory
/// copy and reports `is_degraded()` until a later storage call succeeds.
/// A user whose record could not be loaded is never written back until the
/// record has been read; the first successful read replaces the in-memory
/// defaults.
pub struct PreferenceStore<S: IPreferenceStorage> {
    storage: Arc<S>,
    config: LearningConfig,
    bounds: WeightBounds,
    users: HashMap<String, UserState>,
    degraded: bool,
}

impl<S: IPreferenceStorage> PreferenceStore<S> {
    pub fn new(storage: Arc<S>, config: LearningConfig) -> Self {
        let bounds = WeightBounds::from(&config);
        Self {
            storage,
            config,
            bounds,
            users: HashMap::new(),
            degraded: false,
        }
    }

    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Load (or create) the user's preferences and count a new session.
    ///
    /// Only the first call per user on this instance loads and counts; later
    /// calls return the cached record.
    pub async fn initialize(&mut self, user_id: &str) -> UserPreferences {
        if let Some(state) = self.users.get(user_id) {
            return state.preferences.clone();
        }

        let (preferences, loaded) = self.load(user_id).await;
        let mut stats = LearningStats::default();
        stats.refresh(&preferences.role_weights);
        info!(
            user_id,
            session_count = preferences.session_count,
            loaded,
            "preferences initialized"
        );
        self.users.insert(
            user_id.to_string(),
            UserState {
                preferences: preferences.clone(),
                stats,
                loaded,
            },
        );
        self.persist(user_id).await;
        preferences
    }

    /// Apply one feedback signal to `role`, decay the other roles, persist.
    pub async fn apply_feedback(
        &mut self,
        user_id: &str,
        role: RoleType,
        kind: FeedbackKind,
        confidence: f64,
    ) -> ChorusResult<FeedbackOutcome> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ChorusError::InvalidFeedback {
                reason: format!("confidence must be within [0, 1], got {confidence}"),
            });
        }
        self.ensure_loaded(user_id).await;

        let delta = weights::feedback_delta_with(&self.config, kind, confidence);
        let bounds = self.bounds;
        let decay_rate = self.config.decay_rate;
        let Some(state) = self.users.get_mut(user_id) else {
            return Err(ChorusError::InvalidFeedback {
                reason: format!("user {user_id} is not initialized"),
            });
        };

        let current = &state.preferences.role_weights;
        let previous_weight = current.get(role);
        let updated = weights::decay_others(
            &weights::apply_delta(current, role, delta, bounds),
            role,
            decay_rate,
            bounds,
        );
        let new_weight = updated.get(role);
        state.preferences.role_weights = updated;
        state.preferences.updated_at = Utc::now();
        state.stats.record(role, delta, &state.preferences.role_weights);

        info!(
            user_id,
            role = %role,
            kind = %kind,
            delta,
            previous_weight,
            new_weight,
            "role weight updated"
        );
        let persisted = self.persist(user_id).await;
        Ok(FeedbackOutcome {
            role,
            kind,
            delta,
            previous_weight,
            new_weight,
            persisted,
        })
    }

    /// Live weights, or neutral weights for an unknown user.
    pub fn get_weights(&self, user_id: &str) -> RoleWeights {
        self.users
            .get(user_id)
            .map(|state| state.preferences.role_weights.clone())
            .unwrap_or_default()
    }

    /// Cached record for an initialized user.
    pub fn preferences(&self, user_id: &str) -> Option<&UserPreferences> {
        self.users.get(user_id).map(|state| &state.preferences)
    }

    /// Every weight back to neutral, counters cleared, persisted immediately.
    pub async fn reset(&mut self, user_id: &str) {
        self.ensure_loaded(user_id).await;
        if let Some(state) = self.users.get_mut(user_id) {
            state.preferences.role_weights = RoleWeights::neutral();
            state.preferences.updated_at = Utc::now();
            state.stats = LearningStats::default();
        }
        info!(user_id, "preferences reset");
        self.persist(user_id).await;
    }

    pub fn stats(&self, user_id: &str) -> LearningStats {
        self.users
            .get(user_id)
            .map(|state| state.stats.clone())
            .unwrap_or_default()
    }

    /// Read the durable record and count a session on it. Falls back to
    /// defaults (and reports `false`) when the read fails.
    async fn load(&mut self, user_id: &str) -> (UserPreferences, bool) {
        let (mut preferences, loaded) = match self.storage.get(user_id).await {
            Ok(Some(stored)) => {
                self.degraded = false;
                (self.sanitize(user_id, stored), true)
            }
            Ok(None) => {
                self.degraded = false;
                (UserPreferences::new(user_id), true)
            }
            Err(err) => {
                warn!(user_id, error = %err, "preference load failed, using defaults");
                self.degraded = true;
                (UserPreferences::new(user_id), false)
            }
        };
        preferences.session_count = preferences.session_count.saturating_add(1);
        preferences.updated_at = Utc::now();
        (preferences, loaded)
    }

    /// Initialize an unknown user, or retry the read for a user whose record
    /// could not be loaded. A successful retry replaces the in-memory state
    /// with the durable record.
    async fn ensure_loaded(&mut self, user_id: &str) {
        match self.users.get(user_id).map(|state| state.loaded) {
            None => {
                self.initialize(user_id).await;
                return;
            }
            Some(true) => return,
            Some(false) => {}
        }
        let (preferences, loaded) = self.load(user_id).await;
        if !loaded {
            return;
        }
        if let Some(state) = self.users.get_mut(user_id) {
            info!(
                user_id,
                session_count = preferences.session_count,
                "durable preferences recovered, replacing in-memory defaults"
            );
            state.stats = LearningStats::default();
            state.stats.refresh(&preferences.role_weights);
            state.preferences = preferences;
            state.loaded = true;
        }
    }

    /// Clamp loaded weights into bounds and fill in missing roles.
    fn sanitize(&self, user_id: &str, mut stored: UserPreferences) -> UserPreferences {
        let normalized = stored.role_weights.normalized(self.bounds.min, self.bounds.max);
        if normalized != stored.role_weights {
            debug!(user_id, "loaded weights clamped into bounds");
        }
        stored.role_weights = normalized;
        stored.user_id = user_id.to_string();
        stored
    }

    /// Write the cached record. Returns whether the write succeeded.
    async fn persist(&mut self, user_id: &str) -> bool {
        let Some(state) = self.users.get(user_id) else {
            return false;
        };
        if !state.loaded {
            debug!(user_id, "durable record unread, keeping changes in memory");
            return false;
        }
        match self.storage.put(user_id, &state.preferences).await {
            Ok(()) => {
                if self.degraded {
                    info!(user_id, "preference storage recovered");
                }
                self.degraded = false;
                true
            }
            Err(err) => {
                warn!(user_id, error = %err, "preference write failed, keeping in-memory copy");
                self.degraded = true;
                false
            }
        }
    }
}
