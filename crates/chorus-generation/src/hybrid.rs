//! Hybrid generation: rule-based vs. external generative capability.
//!
//! Per request:
//! 1. adapt the rule-based ratio from the rolling metrics,
//! 2. roll against the ratio,
//! 3. rule-based path (or capability not ready) → rule-based, else filler,
//! 4. generative path → up to `1 + max_retries` bounded attempts, then
//!    fallback to rule-based unless fallback is disabled.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

use chorus_core::config::GenerationConfig;
use chorus_core::constants::FILLER_UTTERANCES;
use chorus_core::errors::{CapabilityError, ChorusError, ChorusResult};
use chorus_core::models::{Comment, CommentSource, ContextSnapshot, RoleType, RoleWeights};
use chorus_core::smoothing::BoundedEma;
use chorus_core::traits::IGenerativeCapability;

use crate::metrics::{GenerationMetrics, MetricsSnapshot};
use crate::rule_based::RuleBasedGenerator;

/// Success rate under which the generative path is throttled.
const LOW_SUCCESS_RATE: f64 = 0.8;
/// Success rate above which the generative path may be given more traffic.
const HIGH_SUCCESS_RATE: f64 = 0.95;

/// Role used for synthetic filler comments.
const FILLER_ROLE: RoleType = RoleType::Reaction;

/// Capability that is never ready. Use it to run the hybrid generator
/// purely rule-based.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCapability;

impl IGenerativeCapability for DisabledCapability {
    async fn generate(
        &self,
        _context: &ContextSnapshot,
        _role: RoleType,
    ) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable)
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Outcome of the bounded attempt loop.
struct AttemptOutcome {
    result: Result<String, CapabilityError>,
    attempts: u32,
    latency_ms: f64,
}

pub struct HybridGenerator<G: IGenerativeCapability> {
    rule_based: RuleBasedGenerator,
    capability: G,
    config: GenerationConfig,
    rule_based_ratio: BoundedEma,
    metrics: GenerationMetrics,
    rng: StdRng,
    filler_cursor: usize,
}

impl<G: IGenerativeCapability> HybridGenerator<G> {
    pub fn new(rule_based: RuleBasedGenerator, capability: G, config: GenerationConfig) -> Self {
        Self::with_rng(rule_based, capability, config, StdRng::from_entropy())
    }

    /// Deterministic path selection for tests and replays.
    pub fn with_seed(
        rule_based: RuleBasedGenerator,
        capability: G,
        config: GenerationConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(rule_based, capability, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        rule_based: RuleBasedGenerator,
        capability: G,
        config: GenerationConfig,
        rng: StdRng,
    ) -> Self {
        let mut rule_based_ratio =
            BoundedEma::new(config.rule_based_ratio, 1.0).with_bounds(config.ratio_floor, config.ratio_ceiling);
        // The configured starting mix may sit outside the adaptation band.
        rule_based_ratio.set_unbounded(config.rule_based_ratio.clamp(0.0, 1.0));
        let metrics = GenerationMetrics::new(&config);
        Self {
            rule_based,
            capability,
            config,
            rule_based_ratio,
            metrics,
            rng,
            filler_cursor: 0,
        }
    }

    pub fn rule_based_ratio(&self) -> f64 {
        self.rule_based_ratio.value()
    }

    /// Always `1 − rule_based_ratio`.
    pub fn llm_ratio(&self) -> f64 {
        1.0 - self.rule_based_ratio.value()
    }

    /// Set the mix from two non-negative shares, normalized to sum to 1.
    pub fn set_mixing_ratio(&mut self, rule_based: f64, llm: f64) -> ChorusResult<()> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(rule_based) || !valid(llm) || rule_based + llm <= 0.0 {
            return Err(ChorusError::InvalidConfig {
                field: "mixing_ratio".to_string(),
                reason: format!(
                    "shares must be non-negative, finite and not both zero (got {rule_based}, {llm})"
                ),
            });
        }
        let ratio = rule_based / (rule_based + llm);
        self.rule_based_ratio.set_unbounded(ratio);
        info!(rule_based_ratio = ratio, "mixing ratio set");
        Ok(())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.rule_based_ratio())
    }

    pub fn rule_based(&self) -> &RuleBasedGenerator {
        &self.rule_based
    }

    pub fn capability(&self) -> &G {
        &self.capability
    }

    /// Generate with the current wall clock.
    pub async fn generate(
        &mut self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
    ) -> ChorusResult<Comment> {
        self.generate_at(context, weights, Utc::now()).await
    }

    /// Always returns a comment unless fallback is disabled and the
    /// generative path failed terminally.
    pub async fn generate_at(
        &mut self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
        now: DateTime<Utc>,
    ) -> ChorusResult<Comment> {
        let context = context.sanitized();
        self.adapt_ratio();
        self.metrics.total_requests += 1;

        let roll: f64 = self.rng.gen();
        let use_rule_based = roll < self.rule_based_ratio();
        if use_rule_based || !self.capability.is_ready() {
            self.metrics.rule_based_requests += 1;
            return Ok(self.rule_based_or_filler(&context, weights, now));
        }

        self.metrics.generative_requests += 1;
        let role = self
            .rule_based
            .select_role(&context, weights, now)
            .unwrap_or_else(|| weights.most_preferred());

        let attempts = self.config.max_retries.saturating_add(1);
        let per_attempt = Duration::from_millis(self.config.attempt_timeout_ms);
        let outcome = Self::attempt(&self.capability, &context, role, attempts, per_attempt).await;

        self.metrics.retries += u64::from(outcome.attempts.saturating_sub(1));
        match outcome.result {
            Ok(text) => {
                self.metrics.record_completion(true, outcome.latency_ms);
                debug!(role = %role, latency_ms = outcome.latency_ms, "generative comment");
                let comment = Comment::new(role, text, CommentSource::Generative, &context, now);
                self.rule_based.note_emitted(&comment.content);
                Ok(comment)
            }
            Err(err) => {
                self.metrics.record_completion(false, outcome.latency_ms);
                if self.config.fallback_to_rule_based {
                    self.metrics.fallbacks += 1;
                    warn!(
                        capability = self.capability.name(),
                        attempts = outcome.attempts,
                        error = %err,
                        "generative path failed, falling back to rule-based"
                    );
                    Ok(self.rule_based_or_filler(&context, weights, now))
                } else {
                    Err(ChorusError::GenerationFailed {
                        attempts: outcome.attempts,
                        reason: err.to_string(),
                    })
                }
            }
        }
    }

    /// Raise the rule-based share when the backend is failing or slow, lower
    /// it when the backend is healthy and fast. No-op before the first
    /// completed generative request.
    fn adapt_ratio(&mut self) {
        if self.metrics.completed() == 0 {
            return;
        }
        let success_rate = self.metrics.success_rate();
        let latency = self.metrics.avg_latency_ms();
        let threshold = self.config.performance_threshold_ms;

        let before = self.rule_based_ratio();
        if success_rate < LOW_SUCCESS_RATE || latency > threshold {
            self.rule_based_ratio.nudge(self.config.ratio_increase_step);
        } else if success_rate > HIGH_SUCCESS_RATE && latency < threshold / 2.0 {
            self.rule_based_ratio.nudge(-self.config.ratio_decrease_step);
        }
        let after = self.rule_based_ratio();
        if after != before {
            debug!(before, after, success_rate, latency, "rule-based ratio adapted");
        }
    }

    async fn attempt(
        capability: &G,
        context: &ContextSnapshot,
        role: RoleType,
        attempts: u32,
        per_attempt: Duration,
    ) -> AttemptOutcome {
        let started = Instant::now();
        let mut last_error = CapabilityError::Unavailable;
        let mut made = 0;
        while made < attempts {
            made += 1;
            let result = match timeout(per_attempt, capability.generate(context, role)).await {
                Ok(Ok(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
                Ok(Ok(_)) => Err(CapabilityError::EmptyResponse),
                Ok(Err(err)) => Err(err),
                Err(_) => Err(CapabilityError::Timeout {
                    timeout_ms: per_attempt.as_millis() as u64,
                }),
            };
            match result {
                Ok(text) => {
                    return AttemptOutcome {
                        result: Ok(text),
                        attempts: made,
                        latency_ms: elapsed_ms(started),
                    };
                }
                Err(err) => {
                    debug!(attempt = made, error = %err, "generative attempt failed");
                    last_error = err;
                }
            }
        }
        AttemptOutcome {
            result: Err(last_error),
            attempts: made,
            latency_ms: elapsed_ms(started),
        }
    }

    fn rule_based_or_filler(
        &mut self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
        now: DateTime<Utc>,
    ) -> Comment {
        match self.try_rule_based(context, weights, now) {
            Ok(comment) => comment,
            Err(err) => {
                self.metrics.fillers += 1;
                let content = FILLER_UTTERANCES[self.filler_cursor % FILLER_UTTERANCES.len()];
                self.filler_cursor = self.filler_cursor.wrapping_add(1);
                debug!(content, reason = %err, "emitting filler");
                Comment::new(FILLER_ROLE, content, CommentSource::Filler, context, now)
            }
        }
    }

    fn try_rule_based(
        &mut self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
        now: DateTime<Utc>,
    ) -> ChorusResult<Comment> {
        self.rule_based
            .generate_at(context, weights, now)
            .ok_or(ChorusError::GenerationUnavailable)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
