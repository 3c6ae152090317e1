//! Configuration for every Chorus subsystem.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`CHORUS_*`)
//! 2. Config file passed to [`ChorusConfig::load`]
//! 3. Compiled defaults (see [`defaults`])

pub mod defaults;
mod frequency_config;
mod generation_config;
mod interaction_config;
mod learning_config;
mod observability_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use frequency_config::FrequencyConfig;
pub use generation_config::GenerationConfig;
pub use interaction_config::InteractionConfig;
pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;

use crate::constants::{NEUTRAL_WEIGHT, WEIGHT_SUM_TOLERANCE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChorusConfig {
    pub frequency: FrequencyConfig,
    pub generation: GenerationConfig,
    pub interaction: InteractionConfig,
    pub learning: LearningConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl ChorusConfig {
    /// Load a TOML file, apply `CHORUS_*` environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: ChorusConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Unset keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ChorusConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in [`load`](Self::load)).
    /// Unparseable values are skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CHORUS_BASE_FREQUENCY").and_then(|v| v.parse().ok()) {
            self.frequency.base_frequency = v;
        }
        if let Some(v) = lookup("CHORUS_RULE_BASED_RATIO").and_then(|v| v.parse().ok()) {
            self.generation.rule_based_ratio = v;
        }
        if let Some(v) = lookup("CHORUS_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("CHORUS_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.frequency;
        positive("frequency.base_frequency", f.base_frequency)?;
        positive("frequency.min_frequency", f.min_frequency)?;
        positive("frequency.max_frequency", f.max_frequency)?;
        if f.min_frequency > f.max_frequency {
            return Err(invalid(
                "frequency.min_frequency",
                "must not exceed frequency.max_frequency",
            ));
        }
        unit_interval("frequency.baseline_activity", f.baseline_activity)?;
        if !(f.adaptation_smoothness > 0.0 && f.adaptation_smoothness <= 1.0) {
            return Err(invalid(
                "frequency.adaptation_smoothness",
                "must be in (0.0, 1.0]",
            ));
        }
        positive("frequency.silence_ramp_ms", f.silence_ramp_ms)?;
        positive("frequency.max_step_fraction", f.max_step_fraction)?;
        if !(f.silence_threshold_ms.is_finite() && f.silence_threshold_ms >= 0.0) {
            return Err(invalid("frequency.silence_threshold_ms", "must be >= 0"));
        }

        let g = &self.generation;
        unit_interval("generation.rule_based_ratio", g.rule_based_ratio)?;
        unit_interval("generation.ratio_floor", g.ratio_floor)?;
        unit_interval("generation.ratio_ceiling", g.ratio_ceiling)?;
        if g.ratio_floor > g.ratio_ceiling {
            return Err(invalid(
                "generation.ratio_floor",
                "must not exceed generation.ratio_ceiling",
            ));
        }
        if !(g.metrics_alpha > 0.0 && g.metrics_alpha <= 1.0) {
            return Err(invalid("generation.metrics_alpha", "must be in (0.0, 1.0]"));
        }
        if g.attempt_timeout_ms == 0 {
            return Err(invalid(
                "generation.attempt_timeout_ms",
                "must be greater than 0",
            ));
        }
        positive("generation.performance_threshold_ms", g.performance_threshold_ms)?;
        unit_interval("generation.ratio_increase_step", g.ratio_increase_step)?;
        unit_interval("generation.ratio_decrease_step", g.ratio_decrease_step)?;

        let i = &self.interaction;
        positive("interaction.pickup_window_ms", i.pickup_window_ms)?;
        unit_interval("interaction.timing_weight", i.timing_weight)?;
        unit_interval("interaction.content_weight", i.content_weight)?;
        if (i.timing_weight + i.content_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "interaction.timing_weight",
                "timing_weight + content_weight must equal 1.0",
            ));
        }
        unit_interval("interaction.similarity_threshold", i.similarity_threshold)?;

        let l = &self.learning;
        positive("learning.min_weight", l.min_weight)?;
        positive("learning.max_weight", l.max_weight)?;
        if !(l.min_weight <= NEUTRAL_WEIGHT && NEUTRAL_WEIGHT <= l.max_weight) {
            return Err(invalid(
                "learning.min_weight",
                "bounds must satisfy min_weight <= 1.0 <= max_weight",
            ));
        }
        if !(l.decay_rate.is_finite() && (0.0..1.0).contains(&l.decay_rate)) {
            return Err(invalid("learning.decay_rate", "must be in [0.0, 1.0)"));
        }
        if !(l.learning_rate.is_finite() && l.learning_rate >= 0.0) {
            return Err(invalid("learning.learning_rate", "must be >= 0"));
        }
        for (field, value) in [
            ("learning.thumbs_up_multiplier", l.thumbs_up_multiplier),
            ("learning.thumbs_down_multiplier", l.thumbs_down_multiplier),
            ("learning.click_multiplier", l.click_multiplier),
            ("learning.pickup_multiplier", l.pickup_multiplier),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}
