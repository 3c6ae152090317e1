use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use chorus_core::config::GenerationConfig;
use chorus_core::errors::{CapabilityError, ChorusError};
use chorus_core::models::{CommentSource, ContextSnapshot, RoleType, RoleWeights};
use chorus_core::traits::IGenerativeCapability;
use chorus_generation::{DisabledCapability, HybridGenerator, RoleCatalog, RuleBasedGenerator};
use test_fixtures::{ContextBuilder, ScriptedCapability, Step};

fn afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap()
}

fn hybrid<G: IGenerativeCapability>(capability: G, config: GenerationConfig) -> HybridGenerator<G> {
    let rule_based = RuleBasedGenerator::new(RoleCatalog::default_catalog(), &config);
    HybridGenerator::with_seed(rule_based, capability, config, 7)
}

/// Generator that always takes the generative path until adaptation kicks in.
fn generative_only<G: IGenerativeCapability>(capability: G, config: GenerationConfig) -> HybridGenerator<G> {
    let mut gen = hybrid(capability, config);
    gen.set_mixing_ratio(0.0, 1.0).unwrap();
    gen
}

fn funny() -> ContextSnapshot {
    ContextBuilder::new().transcript("haha that was funny").build()
}

fn nothing_matches() -> ContextSnapshot {
    ContextBuilder::new().transcript("the weather report").build()
}

// ── Path selection ───────────────────────────────────────────────────────

#[tokio::test]
async fn not_ready_capability_is_never_called() {
    let capability = ScriptedCapability::always("generated");
    capability.set_ready(false);
    let mut gen = generative_only(capability, GenerationConfig::default());

    let comment = gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    assert_eq!(comment.source, CommentSource::RuleBased);
    assert_eq!(comment.role, RoleType::Humor);
    assert_eq!(gen.capability().calls(), 0);
    assert_eq!(gen.metrics().rule_based_requests, 1);
}

#[tokio::test]
async fn disabled_capability_falls_back_to_filler() {
    let mut gen = hybrid(DisabledCapability, GenerationConfig::default());
    let comment = gen
        .generate_at(&nothing_matches(), &RoleWeights::neutral(), afternoon())
        .await
        .unwrap();
    assert_eq!(comment.source, CommentSource::Filler);
    assert_eq!(comment.role, RoleType::Reaction);
    assert_eq!(gen.metrics().fillers, 1);
}

#[tokio::test]
async fn generative_comment_uses_selected_role_and_trimmed_text() {
    let mut gen = generative_only(ScriptedCapability::always("  so funny!  "), GenerationConfig::default());
    let comment = gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    assert_eq!(comment.source, CommentSource::Generative);
    assert_eq!(comment.role, RoleType::Humor);
    assert_eq!(comment.content, "so funny!");
    assert_eq!(gen.rule_based().recent().last(), Some("so funny!"));
}

// ── Retries and fallback ─────────────────────────────────────────────────

#[tokio::test]
async fn retries_until_success() {
    let capability = ScriptedCapability::new(
        vec![
            Step::fail(CapabilityError::Backend("boom".into())),
            Step::reply("   "),
        ],
        Step::reply("third time lucky"),
    );
    let mut gen = generative_only(capability, GenerationConfig::default());
    let comment = gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();

    assert_eq!(comment.content, "third time lucky");
    let metrics = gen.metrics();
    assert_eq!(metrics.retries, 2);
    assert_eq!(metrics.generative_successes, 1);
    assert_eq!(gen.capability().calls(), 3);
}

#[tokio::test]
async fn terminal_failure_falls_back_to_rule_based() {
    let mut gen = generative_only(ScriptedCapability::always_failing(), GenerationConfig::default());
    let comment = gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();

    assert_eq!(comment.source, CommentSource::RuleBased);
    let metrics = gen.metrics();
    assert_eq!(metrics.fallbacks, 1);
    assert_eq!(metrics.generative_failures, 1);
    assert!((metrics.success_rate - 0.9).abs() < 1e-12);
    assert_eq!(gen.capability().calls(), 3);
}

#[tokio::test]
async fn disabled_fallback_surfaces_generation_failed() {
    let config = GenerationConfig {
        fallback_to_rule_based: false,
        ..GenerationConfig::default()
    };
    let mut gen = generative_only(ScriptedCapability::always_failing(), config);
    let err = gen
        .generate_at(&funny(), &RoleWeights::neutral(), afternoon())
        .await
        .unwrap_err();
    assert!(matches!(err, ChorusError::GenerationFailed { attempts: 3, .. }));
}

#[tokio::test(start_paused = true)]
async fn slow_attempts_time_out() {
    let config = GenerationConfig {
        attempt_timeout_ms: 10,
        max_retries: 0,
        fallback_to_rule_based: false,
        ..GenerationConfig::default()
    };
    let capability = ScriptedCapability::always("late").into_slow(Duration::from_millis(50));
    let mut gen = generative_only(capability, config);
    let err = gen
        .generate_at(&funny(), &RoleWeights::neutral(), afternoon())
        .await
        .unwrap_err();
    match err {
        ChorusError::GenerationFailed { attempts, reason } => {
            assert_eq!(attempts, 1);
            assert!(reason.contains("timed out"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fallback_guarantee_under_repeated_failure() {
    let mut gen = generative_only(ScriptedCapability::always_failing(), GenerationConfig::default());
    for _ in 0..25 {
        let result = gen.generate_at(&nothing_matches(), &RoleWeights::neutral(), afternoon()).await;
        assert!(result.is_ok());
    }
    assert!(gen.metrics().fallbacks > 0);
}

// ── Cancellation ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn abandoned_request_leaves_metrics_untouched() {
    let capability = ScriptedCapability::always("eventually").into_slow(Duration::from_secs(1));
    let mut gen = generative_only(capability, GenerationConfig::default());

    let ctx = funny();
    let weights = RoleWeights::neutral();
    let abandoned =
        tokio::time::timeout(Duration::from_millis(5), gen.generate_at(&ctx, &weights, afternoon())).await;
    assert!(abandoned.is_err());

    let metrics = gen.metrics();
    assert_eq!(metrics.success_rate, 1.0);
    assert_eq!(metrics.avg_latency_ms, 0.0);
    assert_eq!(metrics.generative_successes + metrics.generative_failures, 0);
}

// ── Ratio adaptation ─────────────────────────────────────────────────────

#[tokio::test]
async fn failures_raise_rule_based_ratio_up_to_ceiling() {
    let mut gen = generative_only(ScriptedCapability::always_failing(), GenerationConfig::default());
    for _ in 0..3 {
        gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    }
    assert_eq!(gen.rule_based_ratio(), 0.0);

    // success_rate is now 0.729, so the next decision raises the ratio.
    gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    assert!((gen.rule_based_ratio() - 0.05).abs() < 1e-12);

    for _ in 0..100 {
        gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    }
    assert!((gen.rule_based_ratio() - 0.9).abs() < 1e-12);
}

#[tokio::test]
async fn healthy_backend_lowers_ratio_but_not_below_floor() {
    let mut gen = generative_only(ScriptedCapability::always("ok"), GenerationConfig::default());
    gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    // Below the floor already: adaptation never pushes it further down.
    gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    assert_eq!(gen.rule_based_ratio(), 0.0);

    gen.set_mixing_ratio(0.7, 0.3).unwrap();
    gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    assert!((gen.rule_based_ratio() - 0.68).abs() < 1e-12);

    for _ in 0..50 {
        gen.generate_at(&funny(), &RoleWeights::neutral(), afternoon()).await.unwrap();
    }
    assert!((gen.rule_based_ratio() - 0.5).abs() < 1e-12);
}

#[test]
fn no_adaptation_before_first_completion() {
    let gen = hybrid(DisabledCapability, GenerationConfig::default());
    assert!((gen.rule_based_ratio() - 0.7).abs() < 1e-12);
    assert!((gen.llm_ratio() - 0.3).abs() < 1e-12);
}

#[test]
fn invalid_mixing_ratio_is_rejected_without_mutation() {
    let mut gen = hybrid(DisabledCapability, GenerationConfig::default());
    for (a, b) in [(0.0, 0.0), (-1.0, 2.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
        let err = gen.set_mixing_ratio(a, b).unwrap_err();
        assert!(matches!(err, ChorusError::InvalidConfig { .. }));
        assert!((gen.rule_based_ratio() - 0.7).abs() < 1e-12);
    }
    gen.set_mixing_ratio(3.0, 1.0).unwrap();
    assert!((gen.rule_based_ratio() - 0.75).abs() < 1e-12);
}

// ── Properties ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ratio_invariant_holds_for_any_setter_input(
        inputs in proptest::collection::vec((-2.0f64..5.0, -2.0f64..5.0), 1..30),
    ) {
        let mut gen = hybrid(DisabledCapability, GenerationConfig::default());
        for (a, b) in inputs {
            let before = gen.rule_based_ratio();
            let accepted = gen.set_mixing_ratio(a, b).is_ok();
            prop_assert_eq!(accepted, a >= 0.0 && b >= 0.0 && a + b > 0.0);
            if !accepted {
                prop_assert_eq!(gen.rule_based_ratio(), before);
            }
            prop_assert!((gen.rule_based_ratio() + gen.llm_ratio() - 1.0).abs() < 1e-6);
            prop_assert!((0.0..=1.0).contains(&gen.rule_based_ratio()));
        }
    }

    #[test]
    fn fallback_always_yields_a_comment(outcomes in proptest::collection::vec(any::<bool>(), 1..20)) {
        let script = outcomes
            .iter()
            .map(|ok| if *ok { Step::reply("fine") } else { Step::fail(CapabilityError::Unavailable) })
            .collect();
        let capability = ScriptedCapability::new(script, Step::fail(CapabilityError::EmptyResponse));
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async {
            let mut gen = generative_only(capability, GenerationConfig::default());
            for _ in 0..outcomes.len() {
                let result = gen.generate_at(&nothing_matches(), &RoleWeights::neutral(), afternoon()).await;
                assert!(result.is_ok());
                let ratio = gen.rule_based_ratio();
                assert!((ratio + gen.llm_ratio() - 1.0).abs() < 1e-6);
            }
        });
    }
}
