//! Rolling performance metrics for the generative path.

use serde::{Deserialize, Serialize};

use chorus_core::config::GenerationConfig;
use chorus_core::smoothing::BoundedEma;

/// Success rate and latency EMAs plus plain request counters.
///
/// The EMAs only move when a generative request completes (success or
/// terminal failure); an abandoned request leaves them untouched.
#[derive(Debug, Clone)]
pub struct GenerationMetrics {
    success_rate: BoundedEma,
    avg_latency_ms: BoundedEma,
    pub total_requests: u64,
    pub rule_based_requests: u64,
    pub generative_requests: u64,
    pub generative_successes: u64,
    pub generative_failures: u64,
    pub retries: u64,
    pub fallbacks: u64,
    pub fillers: u64,
}

impl GenerationMetrics {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            success_rate: BoundedEma::new(1.0, config.metrics_alpha).with_bounds(0.0, 1.0),
            avg_latency_ms: BoundedEma::new(0.0, config.metrics_alpha)
                .with_bounds(0.0, f64::INFINITY),
            total_requests: 0,
            rule_based_requests: 0,
            generative_requests: 0,
            generative_successes: 0,
            generative_failures: 0,
            retries: 0,
            fallbacks: 0,
            fillers: 0,
        }
    }

    /// Fold in one completed generative request.
    pub fn record_completion(&mut self, success: bool, latency_ms: f64) {
        self.success_rate.update(if success { 1.0 } else { 0.0 });
        self.avg_latency_ms.update(latency_ms.max(0.0));
        if success {
            self.generative_successes += 1;
        } else {
            self.generative_failures += 1;
        }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate.value()
    }

    pub fn avg_latency_ms(&self) -> f64 {
        self.avg_latency_ms.value()
    }

    /// Completed generative requests folded into the EMAs.
    pub fn completed(&self) -> u64 {
        self.success_rate.samples()
    }

    pub fn snapshot(&self, rule_based_ratio: f64) -> MetricsSnapshot {
        MetricsSnapshot {
            success_rate: self.success_rate(),
            avg_latency_ms: self.avg_latency_ms(),
            rule_based_ratio,
            llm_ratio: 1.0 - rule_based_ratio,
            total_requests: self.total_requests,
            rule_based_requests: self.rule_based_requests,
            generative_requests: self.generative_requests,
            generative_successes: self.generative_successes,
            generative_failures: self.generative_failures,
            retries: self.retries,
            fallbacks: self.fallbacks,
            fillers: self.fillers,
        }
    }
}

/// Serializable view of the generator's metrics and current mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub success_rate: f64,
    pub avg_latency_ms: f64,
    pub rule_based_ratio: f64,
    pub llm_ratio: f64,
    pub total_requests: u64,
    pub rule_based_requests: u64,
    pub generative_requests: u64,
    pub generative_successes: u64,
    pub generative_failures: u64,
    pub retries: u64,
    pub fallbacks: u64,
    pub fillers: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_follow_documented_recurrence() {
        let mut metrics = GenerationMetrics::new(&GenerationConfig::default());
        metrics.record_completion(false, 1_000.0);
        assert!((metrics.success_rate() - 0.9).abs() < 1e-12);
        assert!((metrics.avg_latency_ms() - 100.0).abs() < 1e-9);
        metrics.record_completion(true, 1_000.0);
        assert!((metrics.success_rate() - 0.91).abs() < 1e-12);
        assert!((metrics.avg_latency_ms() - 190.0).abs() < 1e-9);
        assert_eq!(metrics.completed(), 2);
        assert_eq!(metrics.generative_failures, 1);
        assert_eq!(metrics.generative_successes, 1);
    }
}
