use chrono::Utc;

use chorus_core::models::DegradationEvent;
use chorus_observability::tracing_setup::spans::names;
use chorus_observability::{components, init_tracing, DegradationTracker, RecoveryStatus};

fn event(component: &str) -> DegradationEvent {
    DegradationEvent {
        component: component.to_string(),
        failure: "backend timeout".to_string(),
        fallback_used: "rule_based".to_string(),
        timestamp: Utc::now(),
    }
}

// ── Degradation tracker ──────────────────────────────────────────────────

#[test]
fn record_and_recover() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event(components::GENERATION));
    assert!(tracker.is_active(components::GENERATION));
    assert!(!tracker.is_active(components::PREFERENCE_STORAGE));
    assert_eq!(tracker.active_degradations().len(), 1);
    assert!(tracker.degraded_duration(components::GENERATION).is_some());

    assert!(tracker.mark_recovered(components::GENERATION));
    assert!(!tracker.mark_recovered(components::GENERATION));
    let tracked = &tracker.events()[0];
    assert_eq!(tracked.recovery_status, RecoveryStatus::Recovered);
    assert!(tracked.recovered_at.is_some());
    assert!(tracker.degraded_duration(components::GENERATION).is_none());
}

#[test]
fn record_once_skips_while_active() {
    let mut tracker = DegradationTracker::new();
    assert!(tracker.record_once(components::PREFERENCE_STORAGE, "unavailable", "in_memory"));
    assert!(!tracker.record_once(components::PREFERENCE_STORAGE, "unavailable", "in_memory"));
    tracker.mark_recovered(components::PREFERENCE_STORAGE);
    assert!(tracker.record_once(components::PREFERENCE_STORAGE, "unavailable", "in_memory"));
    assert_eq!(tracker.events().len(), 2);
    assert_eq!(tracker.count_recent(components::PREFERENCE_STORAGE, 60), 2);
}

#[test]
fn tracked_events_serialize_with_lowercase_status() {
    let mut tracker = DegradationTracker::new();
    tracker.record(event(components::GENERATION));
    let json = serde_json::to_value(&tracker.events()[0]).unwrap();
    assert_eq!(json["recovery_status"], "active");
    assert_eq!(json["event"]["component"], "generation");
}

// ── Tracing ──────────────────────────────────────────────────────────────

#[test]
fn init_is_idempotent() {
    init_tracing();
    init_tracing();
    let span = chorus_observability::learning_span!("u1", "thumbs_up");
    let _guard = span.enter();
    tracing::info!("inside learning span");
}

#[test]
fn span_names_are_namespaced() {
    for name in [names::TICK, names::GENERATION, names::LEARNING, names::PICKUP] {
        assert!(name.starts_with("chorus."));
    }
}
