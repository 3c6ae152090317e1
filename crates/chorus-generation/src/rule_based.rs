//! Deterministic, low-cost comment production.

use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use tracing::debug;

use chorus_core::config::GenerationConfig;
use chorus_core::models::{Comment, CommentSource, ContextSnapshot, RoleType, RoleWeights};
use chorus_core::text::padded_normalized;

use crate::catalog::{Role, RoleCatalog};
use crate::trigger::TriggerInput;

/// Scores eligible roles by weight and picks an utterance that was not
/// emitted recently.
///
/// Emission-rate bookkeeping is not done here; the only state is the ring
/// of recently emitted contents used to avoid immediate repetition.
pub struct RuleBasedGenerator {
    catalog: RoleCatalog,
    recent: VecDeque<String>,
    history_size: usize,
    utc_offset: FixedOffset,
}

impl RuleBasedGenerator {
    pub fn new(catalog: RoleCatalog, config: &GenerationConfig) -> Self {
        let utc_offset = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        Self {
            catalog,
            recent: VecDeque::with_capacity(config.recent_history_size),
            history_size: config.recent_history_size,
            utc_offset,
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Copy learned weights into the catalog priors.
    pub fn set_weights(&mut self, weights: &RoleWeights) {
        self.catalog.set_weights(weights);
    }

    /// Generate using the current wall clock for hour-of-day rules.
    pub fn generate(&mut self, context: &ContextSnapshot, weights: &RoleWeights) -> Option<Comment> {
        self.generate_at(context, weights, Utc::now())
    }

    /// Pick the best eligible role and one of its utterances.
    /// Returns `None` when no role is eligible.
    pub fn generate_at(
        &mut self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
        now: DateTime<Utc>,
    ) -> Option<Comment> {
        let context = context.sanitized();
        let role_type = self.select_role(&context, weights, now)?;
        let role = self.catalog.role(role_type)?;
        let content = self.pick_utterance(role)?;
        debug!(role = %role_type, content = %content, "rule-based comment");

        let comment = Comment::new(role_type, content, CommentSource::RuleBased, &context, now);
        self.note_emitted(&comment.content);
        Some(comment)
    }

    /// Highest-scoring eligible role (score = catalog prior × user weight),
    /// ties broken by catalog order.
    pub fn select_role(
        &self,
        context: &ContextSnapshot,
        weights: &RoleWeights,
        now: DateTime<Utc>,
    ) -> Option<RoleType> {
        let text = transcript_text(context);
        let input = TriggerInput {
            context,
            text: &text,
            local_hour: now.with_timezone(&self.utc_offset).hour(),
        };

        let mut best: Option<(RoleType, f64)> = None;
        for role in self.catalog.iter() {
            if role.utterances.is_empty() || !role.triggers.iter().all(|t| t.matches(&input)) {
                continue;
            }
            let score = role.weight * weights.get(role.role_type);
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((role.role_type, score)),
            }
        }
        best.map(|(role, _)| role)
    }

    /// Remember an emitted content so it is not repeated soon.
    pub fn note_emitted(&mut self, content: &str) {
        if self.history_size == 0 {
            return;
        }
        self.recent.push_back(content.to_string());
        while self.recent.len() > self.history_size {
            self.recent.pop_front();
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// First utterance (catalog order) absent from recent history; if all are
    /// recent, the least recently used one.
    fn pick_utterance(&self, role: &Role) -> Option<String> {
        if let Some(fresh) = role
            .utterances
            .iter()
            .find(|u| !self.recent.iter().any(|r| r == *u))
        {
            return Some(fresh.clone());
        }
        role.utterances
            .iter()
            .min_by_key(|u| self.recent.iter().rposition(|r| r == *u))
            .cloned()
    }
}

fn transcript_text(context: &ContextSnapshot) -> String {
    match &context.current_topic {
        Some(topic) => padded_normalized(&format!("{} {}", context.recent_transcript, topic)),
        None => padded_normalized(&context.recent_transcript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generator() -> RuleBasedGenerator {
        RuleBasedGenerator::new(RoleCatalog::default_catalog(), &GenerationConfig::default())
    }

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 30, 0).unwrap()
    }

    #[test]
    fn no_eligible_role_returns_none() {
        let mut gen = generator();
        let ctx = ContextSnapshot::new("the weather report");
        assert!(gen.generate_at(&ctx, &RoleWeights::neutral(), at_hour(14)).is_none());
    }

    #[test]
    fn greeting_only_in_morning() {
        let mut gen = generator();
        let ctx = ContextSnapshot::new("hello everyone");
        let morning = gen.generate_at(&ctx, &RoleWeights::neutral(), at_hour(8)).unwrap();
        assert_eq!(morning.role, RoleType::Greeting);
        assert!(gen.select_role(&ctx, &RoleWeights::neutral(), at_hour(20)).is_none());
    }

    #[test]
    fn weights_decide_between_eligible_roles() {
        let gen = generator();
        let ctx = ContextSnapshot {
            recent_transcript: "haha why would you do that".into(),
            ..ContextSnapshot::default()
        };
        // Question precedes Humor in catalog order.
        assert_eq!(
            gen.select_role(&ctx, &RoleWeights::neutral(), at_hour(14)),
            Some(RoleType::Question)
        );
        let weights = RoleWeights::neutral().with(RoleType::Humor, 1.5, 0.1, 2.0);
        assert_eq!(gen.select_role(&ctx, &weights, at_hour(14)), Some(RoleType::Humor));
    }

    #[test]
    fn utc_offset_shifts_hour_rules() {
        let config = GenerationConfig {
            utc_offset_minutes: 9 * 60,
            ..GenerationConfig::default()
        };
        let gen = RuleBasedGenerator::new(RoleCatalog::default_catalog(), &config);
        let ctx = ContextSnapshot::new("good morning");
        // 23:30 UTC is 08:30 at UTC+9.
        assert_eq!(
            gen.select_role(&ctx, &RoleWeights::neutral(), at_hour(23)),
            Some(RoleType::Greeting)
        );
    }

    #[test]
    fn history_is_bounded() {
        let mut gen = generator();
        for i in 0..20 {
            gen.note_emitted(&format!("c{i}"));
        }
        assert_eq!(gen.recent().count(), 5);
        assert_eq!(gen.recent().next(), Some("c15"));
    }

    #[test]
    fn two_utterance_role_alternates() {
        let catalog = RoleCatalog::new(vec![Role::new(
            RoleType::Humor,
            &["lol", "haha"],
            vec![crate::trigger::Trigger::keywords(&["funny"])],
        )]);
        let mut gen = RuleBasedGenerator::new(catalog, &GenerationConfig::default());
        let ctx = ContextSnapshot::new("that was funny");
        let mut previous = String::new();
        for _ in 0..10 {
            let comment = gen.generate_at(&ctx, &RoleWeights::neutral(), at_hour(14)).unwrap();
            assert_ne!(comment.content, previous);
            previous = comment.content;
        }
    }

    #[test]
    fn catalog_priors_follow_set_weights() {
        let mut gen = generator();
        let ctx = ContextSnapshot::new("haha why");
        let weights = RoleWeights::neutral().with(RoleType::Humor, 1.5, 0.1, 2.0);
        gen.set_weights(&weights);
        assert_eq!(
            gen.select_role(&ctx, &RoleWeights::neutral(), at_hour(14)),
            Some(RoleType::Humor)
        );
    }
}
