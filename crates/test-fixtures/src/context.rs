use chorus_core::models::{AudioAnalysisTick, ContextSnapshot};

/// Fluent builder for [`ContextSnapshot`] values.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    context: ContextSnapshot,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(mut self, text: &str) -> Self {
        self.context.recent_transcript = text.to_string();
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.context.current_topic = Some(topic.to_string());
        self
    }

    pub fn engagement(mut self, level: f64) -> Self {
        self.context.engagement_level = level;
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.context.speech_volume = volume;
        self
    }

    pub fn speech_rate(mut self, rate: f64) -> Self {
        self.context.speech_rate = rate;
        self
    }

    pub fn silence_secs(mut self, secs: f64) -> Self {
        self.context.silence_duration_seconds = secs;
        self
    }

    pub fn build(self) -> ContextSnapshot {
        self.context
    }
}

/// A 100 ms tick of continuous silence.
pub fn silent_tick(silence_ms: f64) -> AudioAnalysisTick {
    AudioAnalysisTick {
        volume: 0.0,
        speech_rate: 0.0,
        is_speaking: false,
        silence_duration_ms: silence_ms,
        duration_ms: 100.0,
        ..AudioAnalysisTick::default()
    }
}

/// A 100 ms tick of speech at the given volume and rate.
pub fn speaking_tick(volume: f64, speech_rate: f64) -> AudioAnalysisTick {
    AudioAnalysisTick {
        volume,
        speech_rate,
        is_speaking: true,
        silence_duration_ms: 0.0,
        average_volume: volume,
        duration_ms: 100.0,
        ..AudioAnalysisTick::default()
    }
}
