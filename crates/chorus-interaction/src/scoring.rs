//! Pure pickup scoring functions.

use std::collections::HashSet;

/// `max(0, 1 − delay/window)` for `0 ≤ delay ≤ window`, else 0.
pub fn timing_score(delay_ms: f64, window_ms: f64) -> f64 {
    if !delay_ms.is_finite() || delay_ms < 0.0 || window_ms <= 0.0 || delay_ms > window_ms {
        return 0.0;
    }
    (1.0 - delay_ms / window_ms).max(0.0)
}

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`. 0 when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Weighted blend of the timing and content scores.
pub fn confidence(timing: f64, content: f64, timing_weight: f64, content_weight: f64) -> f64 {
    (timing_weight * timing + content_weight * content).clamp(0.0, 1.0)
}
