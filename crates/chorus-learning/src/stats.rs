//! Incrementally maintained learning statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use chorus_core::models::{RoleType, RoleWeights};

/// Per-user learning counters. Each update is O(1); preferred roles are
/// read off the current weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_feedback_events: u64,
    /// Cumulative |delta| applied per role.
    pub cumulative_delta: BTreeMap<RoleType, f64>,
    pub most_preferred: Option<RoleType>,
    pub least_preferred: Option<RoleType>,
}

impl LearningStats {
    pub fn record(&mut self, role: RoleType, delta: f64, weights: &RoleWeights) {
        self.total_feedback_events += 1;
        *self.cumulative_delta.entry(role).or_insert(0.0) += delta.abs();
        self.refresh(weights);
    }

    pub fn refresh(&mut self, weights: &RoleWeights) {
        if weights.is_neutral() {
            self.most_preferred = None;
            self.least_preferred = None;
        } else {
            self.most_preferred = Some(weights.most_preferred());
            self.least_preferred = Some(weights.least_preferred());
        }
    }

    pub fn cumulative(&self, role: RoleType) -> f64 {
        self.cumulative_delta.get(&role).copied().unwrap_or(0.0)
    }
}
