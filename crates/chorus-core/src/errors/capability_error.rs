/// Failure of a single call to the external generative capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("generative capability is not ready")]
    Unavailable,

    #[error("generative call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("generative backend error: {0}")]
    Backend(String),

    #[error("generative backend returned an empty response")]
    EmptyResponse,
}
