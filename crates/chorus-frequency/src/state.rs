use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the controller's state. Rates are comments per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyState {
    pub current_rate_cpm: f64,
    pub target_rate_cpm: f64,
    pub is_in_silence: bool,
    pub silence_duration_ms: f64,
    pub last_emission_at: Option<DateTime<Utc>>,
    pub ticks_processed: u64,
    pub ticks_ignored: u64,
}
