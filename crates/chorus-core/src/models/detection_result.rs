use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::RoleType;

/// Pickup-detection outcome for one tracked comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetectionResult {
    pub comment_id: String,
    pub role: RoleType,
    /// Speech timestamp minus emission timestamp.
    pub delay_ms: f64,
    pub timing_score: f64,
    pub content_score: f64,
    pub confidence: f64,
    pub detected: bool,
}
