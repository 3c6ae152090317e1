//! # chorus-frequency
//!
//! Turns a stream of audio-analysis ticks into a throttled go/no-go decision
//! for comment emission. The emission rate tracks engagement through a
//! bounded EMA and never drops below the activity floor during silence.

pub mod controller;
pub mod factors;
pub mod state;

pub use controller::FrequencyController;
pub use state::FrequencyState;
