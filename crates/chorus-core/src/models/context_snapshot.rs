use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What the host knows about the conversation at one tick.
///
/// Immutable once built; passed by reference through the pipeline and copied
/// into every comment generated from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ContextSnapshot {
    pub recent_transcript: String,
    pub current_topic: Option<String>,
    /// [0, 1]
    pub engagement_level: f64,
    /// [0, 1]
    pub speech_volume: f64,
    /// Ratio to the speaker's baseline; 1.0 is normal pace.
    pub speech_rate: f64,
    pub silence_duration_seconds: f64,
}

impl Default for ContextSnapshot {
    fn default() -> Self {
        Self {
            recent_transcript: String::new(),
            current_topic: None,
            engagement_level: 0.5,
            speech_volume: 0.0,
            speech_rate: 1.0,
            silence_duration_seconds: 0.0,
        }
    }
}

impl ContextSnapshot {
    pub fn new(recent_transcript: impl Into<String>) -> Self {
        Self {
            recent_transcript: recent_transcript.into(),
            ..Self::default()
        }
    }

    /// Copy with every numeric field forced into its documented range.
    /// Non-finite values fall back to the neutral default.
    pub fn sanitized(&self) -> Self {
        let neutral = Self::default();
        Self {
            recent_transcript: self.recent_transcript.clone(),
            current_topic: self.current_topic.clone(),
            engagement_level: finite_or(self.engagement_level, neutral.engagement_level)
                .clamp(0.0, 1.0),
            speech_volume: finite_or(self.speech_volume, neutral.speech_volume).clamp(0.0, 1.0),
            speech_rate: finite_or(self.speech_rate, neutral.speech_rate).max(0.0),
            silence_duration_seconds: finite_or(
                self.silence_duration_seconds,
                neutral.silence_duration_seconds,
            )
            .max(0.0),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
