//! Trigger predicates deciding when a role is eligible.

use serde::{Deserialize, Serialize};

use chorus_core::models::ContextSnapshot;

/// Comparison operator for numeric triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn holds(self, observed: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => observed >= threshold,
            Comparison::AtMost => observed <= threshold,
        }
    }
}

/// A `(kind, operator, value)` predicate over the context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Any of the phrases appears as whole words in the transcript or topic.
    Keyword { any_of: Vec<String> },
    Volume { op: Comparison, value: f64 },
    SilenceSeconds { op: Comparison, value: f64 },
    Engagement { op: Comparison, value: f64 },
    SpeechRate { op: Comparison, value: f64 },
    /// Local hour in `[start, end)`; wraps past midnight when `start > end`.
    HourOfDay { start: u32, end: u32 },
}

/// Inputs a trigger is evaluated against.
pub struct TriggerInput<'a> {
    pub context: &'a ContextSnapshot,
    /// Normalized, space-padded transcript plus topic.
    pub text: &'a str,
    pub local_hour: u32,
}

impl Trigger {
    pub fn keywords(words: &[&str]) -> Self {
        Trigger::Keyword {
            any_of: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn matches(&self, input: &TriggerInput<'_>) -> bool {
        let ctx = input.context;
        match self {
            Trigger::Keyword { any_of } => any_of.iter().any(|phrase| {
                let needle = chorus_core::text::padded_normalized(phrase);
                !needle.trim().is_empty() && input.text.contains(&needle)
            }),
            Trigger::Volume { op, value } => op.holds(ctx.speech_volume, *value),
            Trigger::SilenceSeconds { op, value } => {
                op.holds(ctx.silence_duration_seconds, *value)
            }
            Trigger::Engagement { op, value } => op.holds(ctx.engagement_level, *value),
            Trigger::SpeechRate { op, value } => op.holds(ctx.speech_rate, *value),
            Trigger::HourOfDay { start, end } => {
                let hour = input.local_hour;
                if start <= end {
                    (*start..*end).contains(&hour)
                } else {
                    hour >= *start || hour < *end
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::text::padded_normalized;

    fn input<'a>(ctx: &'a ContextSnapshot, text: &'a str, hour: u32) -> TriggerInput<'a> {
        TriggerInput {
            context: ctx,
            text,
            local_hour: hour,
        }
    }

    #[test]
    fn keyword_matches_whole_words_only() {
        let ctx = ContextSnapshot::default();
        let text = padded_normalized("This is hilarious, haha!");
        let trigger = Trigger::keywords(&["haha", "lol"]);
        assert!(trigger.matches(&input(&ctx, &text, 12)));

        let text = padded_normalized("this is a hahaha moment");
        assert!(!trigger.matches(&input(&ctx, &text, 12)));
    }

    #[test]
    fn numeric_comparisons() {
        let ctx = ContextSnapshot {
            speech_volume: 0.7,
            silence_duration_seconds: 4.0,
            ..ContextSnapshot::default()
        };
        let text = String::from(" ");
        let i = input(&ctx, &text, 0);
        assert!(Trigger::Volume { op: Comparison::AtLeast, value: 0.6 }.matches(&i));
        assert!(!Trigger::Volume { op: Comparison::AtMost, value: 0.6 }.matches(&i));
        assert!(Trigger::SilenceSeconds { op: Comparison::AtLeast, value: 3.0 }.matches(&i));
    }

    #[test]
    fn hour_window_wraps_midnight() {
        let ctx = ContextSnapshot::default();
        let text = String::from(" ");
        let morning = Trigger::HourOfDay { start: 5, end: 11 };
        assert!(morning.matches(&input(&ctx, &text, 5)));
        assert!(!morning.matches(&input(&ctx, &text, 11)));
        let night = Trigger::HourOfDay { start: 22, end: 3 };
        assert!(night.matches(&input(&ctx, &text, 23)));
        assert!(night.matches(&input(&ctx, &text, 1)));
        assert!(!night.matches(&input(&ctx, &text, 12)));
    }
}
