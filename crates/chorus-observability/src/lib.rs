//! # chorus-observability
//!
//! Tracing initialization, span macros, structured events, and the
//! degradation tracker used by the orchestrator.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{components, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_json};
