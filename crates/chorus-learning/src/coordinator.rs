//! Glue between the interaction tracker and the preference store.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use chorus_core::errors::ChorusResult;
use chorus_core::models::{
    Comment, ContextSnapshot, DetectionResult, FeedbackKind, RoleWeights, UserPreferences,
};
use chorus_core::traits::IPreferenceStorage;
use chorus_interaction::{InteractionStats, InteractionTracker};

use crate::stats::LearningStats;
use crate::store::{FeedbackOutcome, PreferenceStore};

pub struct LearningCoordinator<S: IPreferenceStorage> {
    tracker: InteractionTracker,
    store: PreferenceStore<S>,
}

impl<S: IPreferenceStorage> LearningCoordinator<S> {
    pub fn new(tracker: InteractionTracker, store: PreferenceStore<S>) -> Self {
        Self { tracker, store }
    }

    pub async fn initialize(&mut self, user_id: &str) -> UserPreferences {
        self.store.initialize(user_id).await
    }

    pub fn on_comment_emitted(&mut self, comment: Comment) {
        self.tracker.register(comment);
    }

    /// Run pickup detection on a finalized utterance and learn from every
    /// comment picked up for the first time. Returns all detection results.
    pub async fn process_speech(
        &mut self,
        user_id: &str,
        text: &str,
        timestamp: DateTime<Utc>,
        session_id: Option<&str>,
    ) -> Vec<DetectionResult> {
        let results = self.tracker.detect_pickup(text, timestamp);
        for result in results.iter().filter(|r| r.detected) {
            if !self.tracker.record_pickup(result, session_id) {
                debug!(comment_id = %result.comment_id, "pickup already recorded");
                continue;
            }
            if let Err(err) = self
                .store
                .apply_feedback(user_id, result.role, FeedbackKind::Pickup, result.confidence)
                .await
            {
                warn!(comment_id = %result.comment_id, error = %err, "pickup not learned");
            }
        }
        results
    }

    /// Explicit feedback on a tracked comment, learned at full confidence.
    pub async fn record_feedback(
        &mut self,
        user_id: &str,
        comment_id: &str,
        kind: FeedbackKind,
        context: Option<ContextSnapshot>,
        session_id: Option<&str>,
    ) -> ChorusResult<FeedbackOutcome> {
        let event = self
            .tracker
            .track_explicit(comment_id, kind, context, session_id)?;
        self.store
            .apply_feedback(user_id, event.role, kind, event.confidence)
            .await
    }

    pub fn weights(&self, user_id: &str) -> RoleWeights {
        self.store.get_weights(user_id)
    }

    pub async fn reset(&mut self, user_id: &str) {
        self.store.reset(user_id).await;
    }

    pub fn interaction_stats(&self) -> InteractionStats {
        self.tracker.stats()
    }

    pub fn learning_stats(&self, user_id: &str) -> LearningStats {
        self.store.stats(user_id)
    }

    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }

    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }
}
