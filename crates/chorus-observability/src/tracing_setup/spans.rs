//! Span definitions per operation: tick, generation, learning, pickup.

/// Create a span around one orchestrator tick.
#[macro_export]
macro_rules! tick_span {
    ($user_id:expr) => {
        tracing::debug_span!("chorus.tick", user_id = %$user_id)
    };
}

/// Create a span around one generation request.
#[macro_export]
macro_rules! generation_span {
    ($rule_based_ratio:expr) => {
        tracing::info_span!("chorus.generation", rule_based_ratio = $rule_based_ratio)
    };
}

/// Create a span around one feedback application.
#[macro_export]
macro_rules! learning_span {
    ($user_id:expr, $kind:expr) => {
        tracing::info_span!("chorus.learning", user_id = %$user_id, kind = %$kind)
    };
}

/// Create a span around pickup detection for one utterance.
#[macro_export]
macro_rules! pickup_span {
    ($user_id:expr) => {
        tracing::debug_span!("chorus.pickup", user_id = %$user_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const TICK: &str = "chorus.tick";
    pub const GENERATION: &str = "chorus.generation";
    pub const LEARNING: &str = "chorus.learning";
    pub const PICKUP: &str = "chorus.pickup";
}
