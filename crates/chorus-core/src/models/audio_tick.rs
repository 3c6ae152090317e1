use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One audio-analysis window reported by the host's capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AudioAnalysisTick {
    /// Instantaneous volume, [0, 1].
    pub volume: f64,
    /// Speech rate relative to the speaker's baseline.
    pub speech_rate: f64,
    pub is_speaking: bool,
    pub silence_duration_ms: f64,
    pub average_volume: f64,
    pub volume_variance: f64,
    /// Length of the analysis window this tick covers.
    pub duration_ms: f64,
}

impl Default for AudioAnalysisTick {
    fn default() -> Self {
        Self {
            volume: 0.0,
            speech_rate: 1.0,
            is_speaking: false,
            silence_duration_ms: 0.0,
            average_volume: 0.0,
            volume_variance: 0.0,
            duration_ms: 100.0,
        }
    }
}

impl AudioAnalysisTick {
    /// A tick is usable when it covers a positive, finite window.
    pub fn has_duration(&self) -> bool {
        self.duration_ms.is_finite() && self.duration_ms > 0.0
    }
}
