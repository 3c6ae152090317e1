use serde::{Deserialize, Serialize};

use super::defaults;

/// Rule-based and hybrid generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Initial share of requests served by the rule-based path.
    pub rule_based_ratio: f64,
    /// Retries after the first generative attempt.
    pub max_retries: u32,
    /// Deadline for a single generative attempt.
    pub attempt_timeout_ms: u64,
    /// Average latency above which the generative path is throttled.
    pub performance_threshold_ms: f64,
    pub ratio_increase_step: f64,
    pub ratio_decrease_step: f64,
    /// Adaptation never raises the rule-based ratio above this.
    pub ratio_ceiling: f64,
    /// Adaptation never lowers the rule-based ratio below this.
    pub ratio_floor: f64,
    /// EMA factor for success rate and latency.
    pub metrics_alpha: f64,
    pub fallback_to_rule_based: bool,
    /// How many recent comments the rule-based path avoids repeating.
    pub recent_history_size: usize,
    /// Offset applied before evaluating hour-of-day triggers.
    pub utc_offset_minutes: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rule_based_ratio: defaults::DEFAULT_RULE_BASED_RATIO,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            attempt_timeout_ms: defaults::DEFAULT_ATTEMPT_TIMEOUT_MS,
            performance_threshold_ms: defaults::DEFAULT_PERFORMANCE_THRESHOLD_MS,
            ratio_increase_step: defaults::DEFAULT_RATIO_INCREASE_STEP,
            ratio_decrease_step: defaults::DEFAULT_RATIO_DECREASE_STEP,
            ratio_ceiling: defaults::DEFAULT_RATIO_CEILING,
            ratio_floor: defaults::DEFAULT_RATIO_FLOOR,
            metrics_alpha: defaults::DEFAULT_METRICS_ALPHA,
            fallback_to_rule_based: defaults::DEFAULT_FALLBACK_TO_RULE_BASED,
            recent_history_size: defaults::DEFAULT_RECENT_HISTORY_SIZE,
            utc_offset_minutes: defaults::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}
