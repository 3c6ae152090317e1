//! Comment registry, pickup detection and the feedback event log.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use chorus_core::config::InteractionConfig;
use chorus_core::errors::{ChorusError, ChorusResult};
use chorus_core::models::{
    Comment, ContextSnapshot, DetectionResult, FeedbackEvent, FeedbackKind, Interaction, RoleType,
};
use chorus_core::text::word_set;

use crate::scoring;
use crate::stats::InteractionStats;

/// A comment still eligible for pickup detection.
#[derive(Debug, Clone)]
struct WindowEntry {
    comment_id: String,
    role: RoleType,
    words: HashSet<String>,
    emitted_at: DateTime<Utc>,
}

/// Tracks emitted comments and turns later speech or explicit signals into
/// feedback events.
///
/// Two bounded structures back it: a time window of recent comments scanned
/// by [`detect_pickup`](Self::detect_pickup), and an id registry of the last
/// `max_tracked_comments` comments used to resolve feedback. The event log
/// keeps the last `max_events` events.
#[derive(Debug)]
pub struct InteractionTracker {
    config: InteractionConfig,
    window: VecDeque<WindowEntry>,
    registry: HashMap<String, Comment>,
    registry_order: VecDeque<String>,
    events: VecDeque<FeedbackEvent>,
}

impl InteractionTracker {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            window: VecDeque::new(),
            registry: HashMap::new(),
            registry_order: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Track a comment as emitted at its `created_at`.
    pub fn register(&mut self, comment: Comment) {
        let emitted_at = comment.created_at;
        self.register_at(comment, emitted_at);
    }

    /// Comments already out of reach of any speech at or after `emitted_at`
    /// are dropped from the window, and the window never holds more than
    /// `max_tracked_comments` entries.
    pub fn register_at(&mut self, comment: Comment, emitted_at: DateTime<Utc>) {
        let window_ms = self.config.pickup_window_ms;
        self.window
            .retain(|entry| delay_ms(entry.emitted_at, emitted_at) <= window_ms);
        while self.window.len() >= self.config.max_tracked_comments.max(1) {
            self.window.pop_front();
        }
        self.window.push_back(WindowEntry {
            comment_id: comment.id.clone(),
            role: comment.role,
            words: word_set(&comment.content),
            emitted_at,
        });

        let id = comment.id.clone();
        if self.registry.insert(id.clone(), comment).is_none() {
            self.registry_order.push_back(id);
        }
        while self.registry_order.len() > self.config.max_tracked_comments {
            if let Some(oldest) = self.registry_order.pop_front() {
                self.registry.remove(&oldest);
            }
        }
    }

    /// Score every windowed comment against a finalized utterance.
    ///
    /// Entries older than the pickup window (relative to `speech_timestamp`)
    /// are evicted first. Comments emitted after the speech are skipped.
    pub fn detect_pickup(
        &mut self,
        speech_text: &str,
        speech_timestamp: DateTime<Utc>,
    ) -> Vec<DetectionResult> {
        let window_ms = self.config.pickup_window_ms;
        self.window
            .retain(|entry| delay_ms(entry.emitted_at, speech_timestamp) <= window_ms);

        let speech_words = word_set(speech_text);
        let mut results = Vec::new();
        for entry in &self.window {
            let delay = delay_ms(entry.emitted_at, speech_timestamp);
            if delay < 0.0 {
                continue;
            }
            let timing_score = scoring::timing_score(delay, window_ms);
            let content_score = scoring::jaccard(&entry.words, &speech_words);
            let confidence = scoring::confidence(
                timing_score,
                content_score,
                self.config.timing_weight,
                self.config.content_weight,
            );
            results.push(DetectionResult {
                comment_id: entry.comment_id.clone(),
                role: entry.role,
                delay_ms: delay,
                timing_score,
                content_score,
                confidence,
                detected: confidence > self.config.similarity_threshold,
            });
        }
        debug!(
            candidates = results.len(),
            detected = results.iter().filter(|r| r.detected).count(),
            "pickup detection"
        );
        results
    }

    /// Record a detected pickup as implicit feedback.
    ///
    /// Returns `false` (and records nothing) when the result was not a
    /// detection, the comment is no longer tracked, or the comment already
    /// carries an interaction.
    pub fn record_pickup(&mut self, result: &DetectionResult, session_id: Option<&str>) -> bool {
        if !result.detected {
            return false;
        }
        let Some(comment) = self.registry.get_mut(&result.comment_id) else {
            return false;
        };
        if comment.interaction.is_some() {
            return false;
        }

        let now = Utc::now();
        comment.interaction = Some(Interaction {
            kind: FeedbackKind::Pickup,
            confidence: result.confidence,
            recorded_at: now,
        });
        let event = FeedbackEvent {
            comment_id: result.comment_id.clone(),
            role: result.role,
            kind: FeedbackKind::Pickup,
            confidence: result.confidence,
            timestamp: now,
            session_id: session_id.map(str::to_string),
            context: Some(comment.source_context.clone()),
        };
        info!(
            comment_id = %event.comment_id,
            role = %event.role,
            confidence = event.confidence,
            "pickup recorded"
        );
        self.push_event(event);
        true
    }

    /// Record an explicit signal for a tracked comment at full confidence.
    pub fn track_explicit(
        &mut self,
        comment_id: &str,
        kind: FeedbackKind,
        context: Option<ContextSnapshot>,
        session_id: Option<&str>,
    ) -> ChorusResult<FeedbackEvent> {
        if comment_id.trim().is_empty() {
            return Err(ChorusError::InvalidFeedback {
                reason: "empty comment id".to_string(),
            });
        }
        let Some(comment) = self.registry.get_mut(comment_id) else {
            return Err(ChorusError::InvalidFeedback {
                reason: format!("unknown comment id {comment_id}"),
            });
        };

        let now = Utc::now();
        if comment.interaction.is_none() {
            comment.interaction = Some(Interaction {
                kind,
                confidence: 1.0,
                recorded_at: now,
            });
        }
        let event = FeedbackEvent {
            comment_id: comment_id.to_string(),
            role: comment.role,
            kind,
            confidence: 1.0,
            timestamp: now,
            session_id: session_id.map(str::to_string),
            context: context.or_else(|| Some(comment.source_context.clone())),
        };
        info!(comment_id, role = %event.role, kind = %kind, "explicit feedback recorded");
        self.push_event(event.clone());
        Ok(event)
    }

    pub fn stats(&self) -> InteractionStats {
        InteractionStats::from_events(&self.events)
    }

    /// A tracked comment with any attached interaction.
    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.registry.get(comment_id)
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.events.iter()
    }

    /// Comments currently inside the pickup window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn tracked_len(&self) -> usize {
        self.registry.len()
    }

    fn push_event(&mut self, event: FeedbackEvent) {
        self.events.push_back(event);
        while self.events.len() > self.config.max_events {
            self.events.pop_front();
        }
    }
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

fn delay_ms(emitted_at: DateTime<Utc>, speech_at: DateTime<Utc>) -> f64 {
    let delta = speech_at - emitted_at;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000.0,
        None => delta.num_milliseconds() as f64,
    }
}
