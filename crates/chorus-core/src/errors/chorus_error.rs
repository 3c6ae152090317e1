use super::{CapabilityError, ConfigError, StorageError};

/// Workspace-wide result alias.
pub type ChorusResult<T> = Result<T, ChorusError>;

/// Top-level error for the Chorus core.
///
/// Only the two async boundaries (generative capability, durable store) and
/// boundary validation produce these; the control components themselves are
/// total over well-typed input.
#[derive(Debug, thiserror::Error)]
pub enum ChorusError {
    #[error("no role matched and the generative path produced nothing")]
    GenerationUnavailable,

    #[error("generation failed after {attempts} attempts: {reason}")]
    GenerationFailed { attempts: u32, reason: String },

    #[error("generative capability failure: {0}")]
    Capability(#[from] CapabilityError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid feedback: {reason}")]
    InvalidFeedback { reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChorusError {
    /// Whether this error came from the durable store and should degrade to
    /// in-memory defaults rather than fail the caller.
    pub fn is_storage(&self) -> bool {
        matches!(self, ChorusError::Storage(_) | ChorusError::Serialization(_))
    }
}
