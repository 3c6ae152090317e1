//! Bounded exponential smoother shared by the frequency controller and the
//! hybrid generator's performance metrics.
//!
//! ```text
//! next = clamp(current + step, floor, ceiling)
//! step = alpha × (sample − current), limited to ±max_step_fraction × |current|
//! ```
//!
//! # Examples
//!
//! ```
//! use chorus_core::smoothing::BoundedEma;
//!
//! let mut ema = BoundedEma::new(1.0, 0.1).with_bounds(0.0, 1.0);
//! ema.update(0.0);
//! assert!((ema.value() - 0.9).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// An exponential moving average whose value is kept inside `[floor, ceiling]`
/// and whose per-update movement can optionally be capped relative to its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedEma {
    value: f64,
    alpha: f64,
    floor: f64,
    ceiling: f64,
    max_step_fraction: Option<f64>,
    samples: u64,
}

impl BoundedEma {
    /// Create an unbounded smoother. `alpha` is clamped to (0, 1].
    pub fn new(initial: f64, alpha: f64) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(f64::MIN_POSITIVE, 1.0)
        } else {
            1.0
        };
        Self {
            value: initial,
            alpha,
            floor: f64::NEG_INFINITY,
            ceiling: f64::INFINITY,
            max_step_fraction: None,
            samples: 0,
        }
    }

    /// Constrain the value to `[floor, ceiling]`. The current value is clamped immediately.
    pub fn with_bounds(mut self, floor: f64, ceiling: f64) -> Self {
        if floor.is_nan() || ceiling.is_nan() {
            return self;
        }
        let (floor, ceiling) = if floor <= ceiling {
            (floor, ceiling)
        } else {
            (ceiling, floor)
        };
        self.floor = floor;
        self.ceiling = ceiling;
        self.value = self.clamp(self.value);
        self
    }

    /// Cap each update's movement at `fraction × |value|`.
    pub fn with_max_step_fraction(mut self, fraction: f64) -> Self {
        if fraction.is_finite() && fraction > 0.0 {
            self.max_step_fraction = Some(fraction);
        }
        self
    }

    /// Blend a new sample into the average. Non-finite samples are ignored.
    pub fn update(&mut self, sample: f64) -> f64 {
        if !sample.is_finite() {
            return self.value;
        }
        let step = self.limit_step(self.alpha * (sample - self.value));
        self.value = self.clamp(self.value + step);
        self.samples += 1;
        self.value
    }

    /// Move the value by a fixed additive step without crossing a bound the
    /// value has not already crossed.
    ///
    /// A value above the ceiling is never pushed further up and a value below
    /// the floor is never pushed further down, but neither is it snapped back.
    pub fn nudge(&mut self, delta: f64) -> f64 {
        if !delta.is_finite() || delta == 0.0 {
            return self.value;
        }
        if delta > 0.0 && self.value < self.ceiling {
            self.value = (self.value + delta).min(self.ceiling);
        } else if delta < 0.0 && self.value > self.floor {
            self.value = (self.value + delta).max(self.floor);
        }
        self.value
    }

    /// Overwrite the value, clamped to the bounds.
    pub fn set(&mut self, value: f64) {
        if value.is_finite() {
            self.value = self.clamp(value);
        }
    }

    /// Overwrite the value without applying the bounds.
    pub fn set_unbounded(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of samples blended in through `update`.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    fn limit_step(&self, step: f64) -> f64 {
        match self.max_step_fraction {
            Some(fraction) => {
                let limit = fraction * self.value.abs();
                step.clamp(-limit, limit)
            }
            None => step,
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.floor, self.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_follows_ema_recurrence() {
        let mut ema = BoundedEma::new(100.0, 0.1);
        ema.update(200.0);
        assert!((ema.value() - 110.0).abs() < 1e-9);
        assert_eq!(ema.samples(), 1);
    }

    #[test]
    fn step_limit_caps_large_moves() {
        let mut ema = BoundedEma::new(10.0, 1.0).with_max_step_fraction(0.25);
        ema.update(100.0);
        assert!((ema.value() - 12.5).abs() < 1e-9);
        ema.update(0.0);
        assert!((ema.value() - 9.375).abs() < 1e-9);
    }

    #[test]
    fn bounds_clamp_updates() {
        let mut ema = BoundedEma::new(0.5, 1.0).with_bounds(0.0, 1.0);
        ema.update(5.0);
        assert_eq!(ema.value(), 1.0);
        ema.update(-5.0);
        assert_eq!(ema.value(), 0.0);
    }

    #[test]
    fn nudge_never_crosses_untouched_bound() {
        let mut ema = BoundedEma::new(0.2, 0.1).with_bounds(0.5, 0.9);
        // with_bounds clamps the initial value.
        assert_eq!(ema.value(), 0.5);
        ema.set_unbounded(0.2);
        ema.nudge(-0.02);
        assert_eq!(ema.value(), 0.2, "already below floor, must not move further");
        ema.nudge(0.05);
        assert!((ema.value() - 0.25).abs() < 1e-12);
        ema.set(0.88);
        ema.nudge(0.05);
        assert_eq!(ema.value(), 0.9);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let mut ema = BoundedEma::new(3.0, 0.5);
        ema.update(f64::NAN);
        ema.update(f64::INFINITY);
        assert_eq!(ema.value(), 3.0);
        assert_eq!(ema.samples(), 0);
    }
}
