//! # chorus-interaction
//!
//! Tracks emitted comments, infers pickups from later speech, and keeps a
//! capped log of implicit and explicit feedback events.

pub mod scoring;
pub mod stats;
pub mod tracker;

pub use stats::InteractionStats;
pub use tracker::InteractionTracker;
