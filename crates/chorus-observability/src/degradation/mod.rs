//! Degradation tracking.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};

/// Component names recorded by the orchestrator.
pub mod components {
    pub const GENERATION: &str = "generation";
    pub const PREFERENCE_STORAGE: &str = "preference_storage";
}
