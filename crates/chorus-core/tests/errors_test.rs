use chorus_core::errors::*;

#[test]
fn generation_failed_carries_attempts_and_reason() {
    let err = ChorusError::GenerationFailed {
        attempts: 3,
        reason: "timeout".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains("timeout"));
}

#[test]
fn capability_error_converts_into_chorus_error() {
    let err: ChorusError = CapabilityError::Timeout { timeout_ms: 250 }.into();
    assert!(matches!(err, ChorusError::Capability(_)));
    assert!(err.to_string().contains("250"));
}

#[test]
fn storage_errors_are_flagged_for_degradation() {
    let err: ChorusError = StorageError::Unavailable {
        reason: "offline".into(),
    }
    .into();
    assert!(err.is_storage());
    assert!(!ChorusError::GenerationUnavailable.is_storage());
}

#[test]
fn config_error_carries_field() {
    let err = ConfigError::ValidationFailed {
        field: "learning.decay_rate".into(),
        message: "must be in [0.0, 1.0)".into(),
    };
    assert!(err.to_string().contains("learning.decay_rate"));
}
