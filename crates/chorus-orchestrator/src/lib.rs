//! # chorus-orchestrator
//!
//! [`CommentOrchestrator`] owns one frequency controller, hybrid generator,
//! learning coordinator and degradation tracker for a single user session.

pub mod orchestrator;
pub mod session;

pub use orchestrator::CommentOrchestrator;
pub use session::{in_memory_session, open_sqlite_session};
