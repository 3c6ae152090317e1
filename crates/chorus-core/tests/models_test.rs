use chrono::Utc;
use chorus_core::models::*;

#[test]
fn role_types_round_trip_through_snake_case() {
    for role in RoleType::ALL {
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, format!("\"{}\"", role.as_str()));
        assert_eq!(role.as_str().parse::<RoleType>().unwrap(), role);
    }
    assert!("villain".parse::<RoleType>().is_err());
}

#[test]
fn feedback_kind_parse_rejects_unknown() {
    assert_eq!(
        "thumbs_up".parse::<FeedbackKind>().unwrap(),
        FeedbackKind::ThumbsUp
    );
    assert!("heart".parse::<FeedbackKind>().is_err());
    assert!(!FeedbackKind::Pickup.is_explicit());
    assert!(FeedbackKind::Click.is_explicit());
}

#[test]
fn new_preferences_are_neutral() {
    let prefs = UserPreferences::new("u1");
    assert!(prefs.role_weights.is_neutral());
    assert_eq!(prefs.session_count, 0);
    for role in RoleType::ALL {
        assert_eq!(prefs.role_weights.get(role), 1.0);
    }
}

#[test]
fn preferences_serialize_as_role_keyed_map() {
    let prefs = UserPreferences::new("u1");
    let json = serde_json::to_value(&prefs).unwrap();
    let weights = json["role_weights"].as_object().unwrap();
    assert_eq!(weights.len(), 8);
    assert_eq!(weights["silence_breaker"], 1.0);
    let back: UserPreferences = serde_json::from_value(json).unwrap();
    assert_eq!(back, prefs);
}

#[test]
fn normalized_weights_fill_missing_and_clamp() {
    let weights: RoleWeights = [(RoleType::Humor, 5.0), (RoleType::Question, -1.0)]
        .into_iter()
        .collect();
    let normalized = weights.normalized(0.1, 2.0);
    assert_eq!(normalized.get(RoleType::Humor), 2.0);
    assert_eq!(normalized.get(RoleType::Question), 0.1);
    assert_eq!(normalized.get(RoleType::Greeting), 1.0);
}

#[test]
fn most_and_least_preferred_break_ties_by_catalog_order() {
    let neutral = RoleWeights::neutral();
    assert_eq!(neutral.most_preferred(), RoleType::Greeting);
    assert_eq!(neutral.least_preferred(), RoleType::Greeting);

    let weights = RoleWeights::neutral()
        .with(RoleType::Humor, 1.4, 0.1, 2.0)
        .with(RoleType::Question, 0.6, 0.1, 2.0);
    assert_eq!(weights.most_preferred(), RoleType::Humor);
    assert_eq!(weights.least_preferred(), RoleType::Question);
}

#[test]
fn sanitized_context_clamps_ranges() {
    let ctx = ContextSnapshot {
        recent_transcript: "hello".into(),
        current_topic: Some("Cats".into()),
        engagement_level: 3.0,
        speech_volume: f64::NAN,
        speech_rate: -2.0,
        silence_duration_seconds: -1.0,
    };
    let clean = ctx.sanitized();
    assert_eq!(clean.engagement_level, 1.0);
    assert_eq!(clean.speech_volume, 0.0);
    assert_eq!(clean.speech_rate, 0.0);
    assert_eq!(clean.silence_duration_seconds, 0.0);
    assert_eq!(clean.recent_transcript, "hello");
    assert_eq!(clean.current_topic.as_deref(), Some("Cats"));
}

#[test]
fn comments_get_unique_ids() {
    let ctx = ContextSnapshot::default();
    let a = Comment::new(RoleType::Reaction, "Wow", CommentSource::RuleBased, &ctx, Utc::now());
    let b = Comment::new(RoleType::Reaction, "Wow", CommentSource::RuleBased, &ctx, Utc::now());
    assert_ne!(a.id, b.id);
    assert!(a.interaction.is_none());
}

#[test]
fn tick_without_duration_is_flagged() {
    let mut tick = AudioAnalysisTick::default();
    assert!(tick.has_duration());
    tick.duration_ms = 0.0;
    assert!(!tick.has_duration());
    tick.duration_ms = f64::NAN;
    assert!(!tick.has_duration());
}
