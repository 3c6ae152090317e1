//! Multiplicative factors that shape the target emission rate.
//!
//! ```text
//! target = base_frequency × volume × speech_rate × silence
//! ```

use chorus_core::config::FrequencyConfig;
use chorus_core::models::AudioAnalysisTick;

/// Louder speech invites more comments.
///
/// Formula: `0.5 + clamp(volume, 0, 1)`. Range: 0.5 – 1.5.
pub fn volume(volume: f64) -> f64 {
    let v = if volume.is_finite() { volume } else { 0.0 };
    0.5 + v.clamp(0.0, 1.0)
}

/// Faster speech invites more comments.
///
/// Formula: `clamp(speech_rate, 0.5, 1.5)`. Non-finite rates count as normal pace.
pub fn speech_rate(rate: f64) -> f64 {
    let r = if rate.is_finite() { rate } else { 1.0 };
    r.clamp(0.5, 1.5)
}

/// Silence past the threshold ramps the target down linearly to
/// `baseline_activity` over `silence_ramp_ms`. Range: baseline – 1.0.
pub fn silence(config: &FrequencyConfig, is_speaking: bool, silence_ms: f64) -> f64 {
    if is_speaking || !silence_ms.is_finite() || silence_ms <= config.silence_threshold_ms {
        return 1.0;
    }
    let excess = silence_ms - config.silence_threshold_ms;
    let progress = if config.silence_ramp_ms > 0.0 {
        (excess / config.silence_ramp_ms).min(1.0)
    } else {
        1.0
    };
    let baseline = config.baseline_activity.clamp(0.0, 1.0);
    1.0 - progress * (1.0 - baseline)
}

/// Unclamped target rate for one tick.
pub fn target_rate(config: &FrequencyConfig, tick: &AudioAnalysisTick) -> f64 {
    config.base_frequency
        * volume(tick.volume)
        * speech_rate(tick.speech_rate)
        * silence(config, tick.is_speaking, tick.silence_duration_ms)
}
