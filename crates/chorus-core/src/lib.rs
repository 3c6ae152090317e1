//! # chorus-core
//!
//! Foundation crate for the Chorus live-chat companion.
//! Defines all types, traits, errors, config, and the shared smoothing utility.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod smoothing;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ChorusConfig;
pub use errors::{ChorusError, ChorusResult};
pub use models::{
    AudioAnalysisTick, Comment, CommentSource, ContextSnapshot, FeedbackEvent, FeedbackKind,
    RoleType, RoleWeights, UserPreferences,
};
pub use smoothing::BoundedEma;
