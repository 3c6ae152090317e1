use serde::{Deserialize, Serialize};

use super::defaults;

/// Pickup detection and event-log settings.
///
/// The timing/content weights and the threshold are tuned constants, exposed
/// here so hosts can recalibrate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub pickup_window_ms: f64,
    pub timing_weight: f64,
    pub content_weight: f64,
    /// A detection fires when confidence is strictly above this.
    pub similarity_threshold: f64,
    pub max_tracked_comments: usize,
    pub max_events: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pickup_window_ms: defaults::DEFAULT_PICKUP_WINDOW_MS,
            timing_weight: defaults::DEFAULT_TIMING_WEIGHT,
            content_weight: defaults::DEFAULT_CONTENT_WEIGHT,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            max_tracked_comments: defaults::DEFAULT_MAX_TRACKED_COMMENTS,
            max_events: defaults::DEFAULT_MAX_EVENTS,
        }
    }
}
