use serde::{Deserialize, Serialize};

use super::defaults;

/// Emission-rate control. All rates are comments per minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Rate at normal volume and pace.
    pub base_frequency: f64,
    pub min_frequency: f64,
    pub max_frequency: f64,
    /// Fraction of `base_frequency` kept during prolonged silence.
    pub baseline_activity: f64,
    /// EMA factor in (0, 1]; higher adapts faster.
    pub adaptation_smoothness: f64,
    /// Silence shorter than this does not lower the target.
    pub silence_threshold_ms: f64,
    /// Silence length over which the target ramps down to the baseline.
    pub silence_ramp_ms: f64,
    /// Largest single-update move, as a fraction of the current rate.
    pub max_step_fraction: f64,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            base_frequency: defaults::DEFAULT_BASE_FREQUENCY_CPM,
            min_frequency: defaults::DEFAULT_MIN_FREQUENCY_CPM,
            max_frequency: defaults::DEFAULT_MAX_FREQUENCY_CPM,
            baseline_activity: defaults::DEFAULT_BASELINE_ACTIVITY,
            adaptation_smoothness: defaults::DEFAULT_ADAPTATION_SMOOTHNESS,
            silence_threshold_ms: defaults::DEFAULT_SILENCE_THRESHOLD_MS,
            silence_ramp_ms: defaults::DEFAULT_SILENCE_RAMP_MS,
            max_step_fraction: defaults::DEFAULT_MAX_STEP_FRACTION,
        }
    }
}

impl FrequencyConfig {
    /// Guaranteed minimum rate: `base × baseline_activity`, kept inside `[min, max]`.
    pub fn activity_floor(&self) -> f64 {
        (self.base_frequency * self.baseline_activity)
            .max(self.min_frequency)
            .min(self.max_frequency)
    }
}
