use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::RoleType;
use crate::constants::NEUTRAL_WEIGHT;

/// Per-role preference weights. Roles missing from the map read as neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoleWeights(BTreeMap<RoleType, f64>);

impl Default for RoleWeights {
    fn default() -> Self {
        Self(
            RoleType::ALL
                .into_iter()
                .map(|role| (role, NEUTRAL_WEIGHT))
                .collect(),
        )
    }
}

impl RoleWeights {
    /// Every role at the neutral weight.
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn get(&self, role: RoleType) -> f64 {
        self.0.get(&role).copied().unwrap_or(NEUTRAL_WEIGHT)
    }

    /// Builder-style set, clamped to `[min, max]`.
    pub fn with(mut self, role: RoleType, weight: f64, min: f64, max: f64) -> Self {
        self.set(role, weight, min, max);
        self
    }

    /// Set a weight, clamped to `[min, max]`. Non-finite weights are ignored.
    pub fn set(&mut self, role: RoleType, weight: f64, min: f64, max: f64) {
        if weight.is_finite() {
            self.0.insert(role, weight.max(min).min(max));
        }
    }

    /// Fill in missing roles and clamp every weight into `[min, max]`.
    /// Non-finite stored weights are replaced with the neutral weight.
    pub fn normalized(&self, min: f64, max: f64) -> Self {
        Self(
            RoleType::ALL
                .into_iter()
                .map(|role| {
                    let raw = self.get(role);
                    let weight = if raw.is_finite() { raw } else { NEUTRAL_WEIGHT };
                    (role, weight.max(min).min(max))
                })
                .collect(),
        )
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (RoleType, f64)> + '_ {
        RoleType::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Highest-weighted role; ties go to the earlier role in catalog order.
    pub fn most_preferred(&self) -> RoleType {
        self.iter()
            .fold(None::<(RoleType, f64)>, |best, (role, weight)| match best {
                Some((_, best_weight)) if best_weight >= weight => best,
                _ => Some((role, weight)),
            })
            .map(|(role, _)| role)
            .unwrap_or(RoleType::Reaction)
    }

    /// Lowest-weighted role; ties go to the earlier role in catalog order.
    pub fn least_preferred(&self) -> RoleType {
        self.iter()
            .fold(None::<(RoleType, f64)>, |worst, (role, weight)| match worst {
                Some((_, worst_weight)) if worst_weight <= weight => worst,
                _ => Some((role, weight)),
            })
            .map(|(role, _)| role)
            .unwrap_or(RoleType::Reaction)
    }

    /// True when every role sits exactly at the neutral weight.
    pub fn is_neutral(&self) -> bool {
        self.iter().all(|(_, weight)| weight == NEUTRAL_WEIGHT)
    }
}

impl FromIterator<(RoleType, f64)> for RoleWeights {
    fn from_iter<I: IntoIterator<Item = (RoleType, f64)>>(iter: I) -> Self {
        let mut weights = Self::default();
        for (role, weight) in iter {
            weights.0.insert(role, weight);
        }
        weights
    }
}

/// Durable per-user preference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserPreferences {
    pub user_id: String,
    pub role_weights: RoleWeights,
    pub session_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Fresh record: every weight neutral, no sessions yet.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role_weights: RoleWeights::neutral(),
            session_count: 0,
            updated_at: Utc::now(),
        }
    }
}
