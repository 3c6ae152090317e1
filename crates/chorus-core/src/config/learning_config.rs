use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::FeedbackKind;

/// Preference-learning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub learning_rate: f64,
    /// Per-update pull of unreinforced roles back toward neutral.
    pub decay_rate: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub thumbs_up_multiplier: f64,
    pub thumbs_down_multiplier: f64,
    pub click_multiplier: f64,
    pub pickup_multiplier: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            decay_rate: defaults::DEFAULT_DECAY_RATE,
            min_weight: defaults::DEFAULT_MIN_WEIGHT,
            max_weight: defaults::DEFAULT_MAX_WEIGHT,
            thumbs_up_multiplier: defaults::DEFAULT_THUMBS_UP_MULTIPLIER,
            thumbs_down_multiplier: defaults::DEFAULT_THUMBS_DOWN_MULTIPLIER,
            click_multiplier: defaults::DEFAULT_CLICK_MULTIPLIER,
            pickup_multiplier: defaults::DEFAULT_PICKUP_MULTIPLIER,
        }
    }
}

impl LearningConfig {
    /// Signed strength of one unit of feedback of this kind.
    pub fn multiplier(&self, kind: FeedbackKind) -> f64 {
        match kind {
            FeedbackKind::ThumbsUp => self.thumbs_up_multiplier,
            FeedbackKind::ThumbsDown => self.thumbs_down_multiplier,
            FeedbackKind::Click => self.click_multiplier,
            FeedbackKind::Pickup => self.pickup_multiplier,
        }
    }
}
