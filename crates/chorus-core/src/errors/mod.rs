//! Error types for every Chorus subsystem.

pub mod capability_error;
pub mod chorus_error;
pub mod config_error;
pub mod storage_error;

pub use capability_error::CapabilityError;
pub use chorus_error::{ChorusError, ChorusResult};
pub use config_error::ConfigError;
pub use storage_error::StorageError;
