//! # chorus-generation
//!
//! Comment generation: a static role catalog, a deterministic rule-based
//! generator, and a hybrid generator that mixes in an external generative
//! capability under a self-tuning ratio with bounded retries and fallback.

pub mod catalog;
pub mod hybrid;
pub mod metrics;
pub mod rule_based;
pub mod trigger;

pub use catalog::{Role, RoleCatalog};
pub use hybrid::{DisabledCapability, HybridGenerator};
pub use metrics::{GenerationMetrics, MetricsSnapshot};
pub use rule_based::RuleBasedGenerator;
pub use trigger::{Comparison, Trigger};
