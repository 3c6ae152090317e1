use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use chorus_core::config::FrequencyConfig;
use chorus_core::constants::SECONDS_PER_MINUTE;
use chorus_core::models::AudioAnalysisTick;
use chorus_core::smoothing::BoundedEma;

use crate::factors;
use crate::state::FrequencyState;

/// Emission-rate controller.
///
/// Each tick recomputes a target rate and moves the current rate toward it
/// through a bounded EMA. The rate stays inside
/// `[max(min_frequency, floor), max_frequency]` where
/// `floor = base_frequency × baseline_activity`.
pub struct FrequencyController {
    config: FrequencyConfig,
    rate: BoundedEma,
    floor: f64,
    ceiling: f64,
    target_rate: f64,
    is_in_silence: bool,
    silence_duration_ms: f64,
    last_emission_at: Option<DateTime<Utc>>,
    ticks_processed: u64,
    ticks_ignored: u64,
}

impl FrequencyController {
    pub fn new(config: FrequencyConfig) -> Self {
        let ceiling = config.max_frequency.max(config.min_frequency);
        let floor = config.activity_floor().max(config.min_frequency).min(ceiling);
        let initial = config.base_frequency.max(floor).min(ceiling);
        let rate = BoundedEma::new(initial, config.adaptation_smoothness)
            .with_bounds(floor, ceiling)
            .with_max_step_fraction(config.max_step_fraction);
        Self {
            config,
            rate,
            floor,
            ceiling,
            target_rate: initial,
            is_in_silence: false,
            silence_duration_ms: 0.0,
            last_emission_at: None,
            ticks_processed: 0,
            ticks_ignored: 0,
        }
    }

    /// Fold one analysis tick into the rate. Ticks covering no time are ignored.
    pub fn update(&mut self, tick: &AudioAnalysisTick) {
        if !tick.has_duration() {
            self.ticks_ignored += 1;
            debug!(duration_ms = tick.duration_ms, "ignoring tick without duration");
            return;
        }

        self.is_in_silence = !tick.is_speaking;
        self.silence_duration_ms = if tick.is_speaking || !tick.silence_duration_ms.is_finite() {
            0.0
        } else {
            tick.silence_duration_ms.max(0.0)
        };

        self.target_rate = factors::target_rate(&self.config, tick)
            .max(self.floor)
            .min(self.ceiling);
        let rate = self.rate.update(self.target_rate);
        self.ticks_processed += 1;

        trace!(
            target = self.target_rate,
            rate,
            silent = self.is_in_silence,
            "frequency updated"
        );
    }

    /// Whether enough time has passed since the last emission.
    pub fn should_emit(&self) -> bool {
        self.should_emit_at(Utc::now())
    }

    /// True iff nothing was emitted yet (or the gate was forced open), or at
    /// least `60 / current_rate` seconds elapsed since the last emission.
    pub fn should_emit_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_emission_at {
            None => true,
            Some(last) => {
                let elapsed_secs = (now - last).num_milliseconds() as f64 / 1000.0;
                elapsed_secs >= self.interval_secs()
            }
        }
    }

    pub fn record_emission(&mut self) {
        self.record_emission_at(Utc::now());
    }

    pub fn record_emission_at(&mut self, now: DateTime<Utc>) {
        self.last_emission_at = Some(now);
    }

    /// Open the gate so the next `should_emit` returns true regardless of timing.
    pub fn force_next(&mut self) {
        self.last_emission_at = None;
    }

    /// Minimum gap between emissions at the current rate.
    pub fn interval_secs(&self) -> f64 {
        SECONDS_PER_MINUTE / self.rate.value()
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::try_from_secs_f64(self.interval_secs()).unwrap_or(std::time::Duration::MAX)
    }

    pub fn current_rate(&self) -> f64 {
        self.rate.value()
    }

    /// The guaranteed minimum rate.
    pub fn activity_floor(&self) -> f64 {
        self.floor
    }

    pub fn config(&self) -> &FrequencyConfig {
        &self.config
    }

    pub fn state(&self) -> FrequencyState {
        FrequencyState {
            current_rate_cpm: self.rate.value(),
            target_rate_cpm: self.target_rate,
            is_in_silence: self.is_in_silence,
            silence_duration_ms: self.silence_duration_ms,
            last_emission_at: self.last_emission_at,
            ticks_processed: self.ticks_processed,
            ticks_ignored: self.ticks_ignored,
        }
    }
}

impl Default for FrequencyController {
    fn default() -> Self {
        Self::new(FrequencyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn speaking(volume: f64, rate: f64) -> AudioAnalysisTick {
        AudioAnalysisTick {
            volume,
            speech_rate: rate,
            is_speaking: true,
            duration_ms: 100.0,
            ..AudioAnalysisTick::default()
        }
    }

    #[test]
    fn starts_at_base_frequency() {
        let controller = FrequencyController::default();
        assert_eq!(controller.current_rate(), 6.0);
        assert!((controller.interval_secs() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn loud_fast_speech_raises_rate_gradually() {
        let mut controller = FrequencyController::default();
        let before = controller.current_rate();
        controller.update(&speaking(1.0, 1.5));
        let after = controller.current_rate();
        assert!(after > before);
        assert!(after - before <= 0.25 * before + 1e-12);
    }

    #[test]
    fn zero_duration_tick_is_ignored() {
        let mut controller = FrequencyController::default();
        let mut tick = speaking(1.0, 1.5);
        tick.duration_ms = 0.0;
        controller.update(&tick);
        tick.duration_ms = -5.0;
        controller.update(&tick);
        let state = controller.state();
        assert_eq!(state.current_rate_cpm, 6.0);
        assert_eq!(state.ticks_processed, 0);
        assert_eq!(state.ticks_ignored, 2);
    }

    #[test]
    fn gate_opens_after_interval() {
        let mut controller = FrequencyController::default();
        let t0 = Utc::now();
        assert!(controller.should_emit_at(t0));
        controller.record_emission_at(t0);
        assert!(!controller.should_emit_at(t0 + Duration::seconds(5)));
        assert!(controller.should_emit_at(t0 + Duration::seconds(10)));
    }

    #[test]
    fn force_next_reopens_gate() {
        let mut controller = FrequencyController::default();
        let t0 = Utc::now();
        controller.record_emission_at(t0);
        assert!(!controller.should_emit_at(t0));
        controller.force_next();
        assert!(controller.should_emit_at(t0));
    }

    #[test]
    fn silence_flag_mirrors_tick() {
        let mut controller = FrequencyController::default();
        controller.update(&AudioAnalysisTick {
            is_speaking: false,
            silence_duration_ms: 4_000.0,
            ..AudioAnalysisTick::default()
        });
        assert!(controller.state().is_in_silence);
        assert_eq!(controller.state().silence_duration_ms, 4_000.0);
        controller.update(&speaking(0.5, 1.0));
        assert!(!controller.state().is_in_silence);
        assert_eq!(controller.state().silence_duration_ms, 0.0);
    }
}
