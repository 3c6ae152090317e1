//! Top-level façade for one user session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, Instrument};

use chorus_core::config::ChorusConfig;
use chorus_core::errors::ChorusResult;
use chorus_core::models::{
    AudioAnalysisTick, Comment, CommentSource, ContextSnapshot, DetectionResult, FeedbackKind,
    RoleWeights, UserPreferences,
};
use chorus_core::traits::{IGenerativeCapability, IPreferenceStorage};
use chorus_frequency::{FrequencyController, FrequencyState};
use chorus_generation::{HybridGenerator, MetricsSnapshot, RoleCatalog, RuleBasedGenerator};
use chorus_interaction::{InteractionStats, InteractionTracker};
use chorus_learning::{FeedbackOutcome, LearningCoordinator, LearningStats, PreferenceStore};
use chorus_observability::tracing_setup::events;
use chorus_observability::{components, DegradationTracker};

/// Drives one user's live-chat session.
///
/// Handlers run one at a time (`&mut self`); only generation and storage
/// calls await.
pub struct CommentOrchestrator<G: IGenerativeCapability, S: IPreferenceStorage> {
    user_id: String,
    session_id: String,
    frequency: FrequencyController,
    generator: HybridGenerator<G>,
    learning: LearningCoordinator<S>,
    degradations: DegradationTracker,
    started: bool,
}

impl<G: IGenerativeCapability, S: IPreferenceStorage> CommentOrchestrator<G, S> {
    pub fn new(user_id: &str, config: &ChorusConfig, capability: G, storage: Arc<S>) -> Self {
        let rule_based = RuleBasedGenerator::new(RoleCatalog::default_catalog(), &config.generation);
        let generator = HybridGenerator::new(rule_based, capability, config.generation.clone());
        Self::with_generator(user_id, config, generator, storage)
    }

    /// Build around an existing generator (custom catalog, fixed seed, ...).
    pub fn with_generator(
        user_id: &str,
        config: &ChorusConfig,
        generator: HybridGenerator<G>,
        storage: Arc<S>,
    ) -> Self {
        let tracker = InteractionTracker::new(config.interaction.clone());
        let store = PreferenceStore::new(storage, config.learning.clone());
        Self {
            user_id: user_id.to_string(),
            session_id: uuid::Uuid::new_v4().to_string(),
            frequency: FrequencyController::new(config.frequency.clone()),
            generator,
            learning: LearningCoordinator::new(tracker, store),
            degradations: DegradationTracker::new(),
            started: false,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Load the user's preferences and count the session.
    pub async fn start(&mut self) -> UserPreferences {
        let preferences = self.learning.initialize(&self.user_id).await;
        self.started = true;
        self.note_storage_state();
        preferences
    }

    pub fn on_audio(&mut self, tick: &AudioAnalysisTick) {
        let _guard = chorus_observability::tick_span!(self.user_id).entered();
        self.frequency.update(tick);
    }

    pub async fn tick(&mut self, context: &ContextSnapshot) -> ChorusResult<Option<Comment>> {
        self.tick_at(context, Utc::now()).await
    }

    /// Emit a comment if the frequency gate is open.
    ///
    /// Errors only when fallback is disabled and the generative path failed.
    pub async fn tick_at(
        &mut self,
        context: &ContextSnapshot,
        now: DateTime<Utc>,
    ) -> ChorusResult<Option<Comment>> {
        if !self.started {
            self.start().await;
        }
        if !self.frequency.should_emit_at(now) {
            debug!(rate_cpm = self.frequency.current_rate(), "emission gate closed");
            return Ok(None);
        }

        let weights = self.learning.weights(&self.user_id);
        let fallbacks_before = self.generator.metrics().fallbacks;
        let span = chorus_observability::generation_span!(self.generator.rule_based_ratio());
        let result = self
            .generator
            .generate_at(context, &weights, now)
            .instrument(span)
            .await;
        let comment = match result {
            Ok(comment) => comment,
            Err(err) => {
                self.degradations.record_once(
                    components::GENERATION,
                    &err.to_string(),
                    "none",
                );
                return Err(err);
            }
        };

        if self.generator.metrics().fallbacks > fallbacks_before {
            self.degradations.record_once(
                components::GENERATION,
                "generative path failed after retries",
                "rule_based",
            );
        } else if comment.source == CommentSource::Generative {
            self.degradations.mark_recovered(components::GENERATION);
        }

        self.frequency.record_emission_at(now);
        self.learning.on_comment_emitted(comment.clone());
        self.note_storage_state();
        events::comment_emitted(&comment.id, comment.role.as_str(), source_name(comment.source));
        Ok(Some(comment))
    }

    /// Pickup detection and implicit learning for a finalized utterance.
    pub async fn on_speech(&mut self, text: &str, timestamp: DateTime<Utc>) -> Vec<DetectionResult> {
        let span = chorus_observability::pickup_span!(self.user_id);
        let results = self
            .learning
            .process_speech(&self.user_id, text, timestamp, Some(self.session_id.as_str()))
            .instrument(span)
            .await;
        self.note_storage_state();
        results
    }

    /// Explicit feedback on an emitted comment.
    pub async fn record_feedback(
        &mut self,
        comment_id: &str,
        kind: FeedbackKind,
        context: Option<ContextSnapshot>,
        session_id: Option<&str>,
    ) -> ChorusResult<FeedbackOutcome> {
        let session_id = session_id.unwrap_or(self.session_id.as_str()).to_string();
        let span = chorus_observability::learning_span!(self.user_id, kind);
        let outcome = self
            .learning
            .record_feedback(&self.user_id, comment_id, kind, context, Some(session_id.as_str()))
            .instrument(span)
            .await;
        self.note_storage_state();
        outcome
    }

    pub fn get_weights(&self, user_id: &str) -> RoleWeights {
        self.learning.weights(user_id)
    }

    pub async fn reset(&mut self, user_id: &str) {
        self.learning.reset(user_id).await;
        self.note_storage_state();
    }

    pub fn force_next(&mut self) {
        self.frequency.force_next();
    }

    /// Rebalance the generation paths. See [`HybridGenerator::set_mixing_ratio`].
    pub fn set_mixing_ratio(&mut self, rule_based: f64, llm: f64) -> ChorusResult<()> {
        self.generator.set_mixing_ratio(rule_based, llm)
    }

    pub fn frequency_state(&self) -> FrequencyState {
        self.frequency.state()
    }

    pub fn generation_metrics(&self) -> MetricsSnapshot {
        self.generator.metrics()
    }

    pub fn interaction_stats(&self) -> InteractionStats {
        self.learning.interaction_stats()
    }

    pub fn learning_stats(&self) -> LearningStats {
        self.learning.learning_stats(&self.user_id)
    }

    pub fn degradations(&self) -> &DegradationTracker {
        &self.degradations
    }

    pub fn capability(&self) -> &G {
        self.generator.capability()
    }

    fn note_storage_state(&mut self) {
        if self.learning.is_degraded() {
            self.degradations.record_once(
                components::PREFERENCE_STORAGE,
                "preference storage unavailable",
                "in_memory",
            );
        } else {
            self.degradations.mark_recovered(components::PREFERENCE_STORAGE);
        }
    }
}

fn source_name(source: CommentSource) -> &'static str {
    match source {
        CommentSource::RuleBased => "rule_based",
        CommentSource::Generative => "generative",
        CommentSource::Filler => "filler",
    }
}
