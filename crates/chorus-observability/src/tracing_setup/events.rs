//! Structured log events for key operations.

/// Log an emitted comment.
pub fn comment_emitted(comment_id: &str, role: &str, source: &str) {
    tracing::info!(
        event = "comment_emitted",
        comment_id = %comment_id,
        role = %role,
        source = %source,
        "comment emitted"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a recovery.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "degradation recovered"
    );
}
