use crate::errors::CapabilityError;
use crate::models::{ContextSnapshot, RoleType};

/// The external generative text backend.
///
/// Opaque to the core: it may be slow, may fail, and makes no latency
/// guarantee. Callers bound each call with their own deadline.
#[allow(async_fn_in_trait)]
pub trait IGenerativeCapability: Send + Sync {
    /// Produce one short utterance in the voice of `role` for `context`.
    async fn generate(
        &self,
        context: &ContextSnapshot,
        role: RoleType,
    ) -> Result<String, CapabilityError>;

    /// Whether the backend can currently accept requests (model loaded, key configured, ...).
    fn is_ready(&self) -> bool {
        true
    }

    /// Human-readable backend name.
    fn name(&self) -> &str {
        "generative"
    }
}
