//! # chorus-learning
//!
//! Turns sparse feedback into a bounded, decaying per-user weight vector.
//!
//! - [`weights`]: pure update functions
//! - [`PreferenceStore`]: cached, persisted weights per user
//! - [`LearningCoordinator`]: wires pickup detection and explicit feedback
//!   into the store

pub mod coordinator;
pub mod stats;
pub mod store;
pub mod weights;

pub use coordinator::LearningCoordinator;
pub use stats::LearningStats;
pub use store::{FeedbackOutcome, PreferenceStore};
pub use weights::WeightBounds;
