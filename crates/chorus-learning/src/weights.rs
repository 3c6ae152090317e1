//! Pure weight-update functions. Every result stays within the given bounds.

use chorus_core::config::LearningConfig;
use chorus_core::constants::NEUTRAL_WEIGHT;
use chorus_core::models::{FeedbackKind, RoleType, RoleWeights};

/// Inclusive `[min, max]` range every weight is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    pub min: f64,
    pub max: f64,
}

impl WeightBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, weight: f64) -> f64 {
        weight.max(self.min).min(self.max)
    }

    pub fn contains(&self, weight: f64) -> bool {
        weight >= self.min && weight <= self.max
    }
}

impl From<&LearningConfig> for WeightBounds {
    fn from(config: &LearningConfig) -> Self {
        Self::new(config.min_weight, config.max_weight)
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self::from(&LearningConfig::default())
    }
}

/// `map[role] += delta`, clamped.
pub fn apply_delta(map: &RoleWeights, role: RoleType, delta: f64, bounds: WeightBounds) -> RoleWeights {
    let mut next = map.normalized(bounds.min, bounds.max);
    if delta.is_finite() {
        next.set(role, map.get(role) + delta, bounds.min, bounds.max);
    }
    next
}

/// Pull every role except `excluding` toward neutral:
///
/// ```text
/// w' = 1 + (w − 1) × (1 − decay_rate)
/// ```
pub fn decay_others(
    map: &RoleWeights,
    excluding: RoleType,
    decay_rate: f64,
    bounds: WeightBounds,
) -> RoleWeights {
    let keep = 1.0 - decay_rate.clamp(0.0, 1.0);
    map.iter()
        .map(|(role, weight)| {
            let next = if role == excluding {
                weight
            } else {
                NEUTRAL_WEIGHT + (weight - NEUTRAL_WEIGHT) * keep
            };
            (role, bounds.clamp(next))
        })
        .collect()
}

/// Signed delta for one feedback signal with the default multipliers:
/// thumbs_up +1.5, thumbs_down −1.0, click +0.3, pickup +0.8.
///
/// ```text
/// delta = multiplier(kind) × confidence × learning_rate
/// ```
pub fn feedback_delta(kind: FeedbackKind, confidence: f64, learning_rate: f64) -> f64 {
    LearningConfig::default().multiplier(kind) * confidence * learning_rate
}

/// [`feedback_delta`] with the multipliers and learning rate from `config`.
pub fn feedback_delta_with(config: &LearningConfig, kind: FeedbackKind, confidence: f64) -> f64 {
    config.multiplier(kind) * confidence * config.learning_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_multipliers() {
        assert!((feedback_delta(FeedbackKind::ThumbsUp, 1.0, 0.1) - 0.15).abs() < 1e-12);
        assert!((feedback_delta(FeedbackKind::ThumbsDown, 1.0, 0.1) + 0.1).abs() < 1e-12);
        assert!((feedback_delta(FeedbackKind::Click, 1.0, 0.1) - 0.03).abs() < 1e-12);
        assert!((feedback_delta(FeedbackKind::Pickup, 0.5, 0.1) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn apply_delta_clamps() {
        let bounds = WeightBounds::default();
        let map = RoleWeights::neutral();
        let up = apply_delta(&map, RoleType::Humor, 5.0, bounds);
        assert_eq!(up.get(RoleType::Humor), 2.0);
        let down = apply_delta(&map, RoleType::Humor, -5.0, bounds);
        assert_eq!(down.get(RoleType::Humor), 0.1);
        assert_eq!(down.get(RoleType::Question), 1.0);
    }

    #[test]
    fn decay_moves_others_toward_neutral() {
        let bounds = WeightBounds::default();
        let map = RoleWeights::neutral()
            .with(RoleType::Humor, 2.0, 0.1, 2.0)
            .with(RoleType::Question, 0.5, 0.1, 2.0);
        let decayed = decay_others(&map, RoleType::Humor, 0.1, bounds);
        assert_eq!(decayed.get(RoleType::Humor), 2.0);
        assert!((decayed.get(RoleType::Question) - 0.55).abs() < 1e-12);
        assert_eq!(decayed.get(RoleType::Greeting), 1.0);
    }
}
