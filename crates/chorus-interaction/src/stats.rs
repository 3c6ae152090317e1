//! Aggregate view over the feedback event log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use chorus_core::models::{FeedbackEvent, FeedbackKind};

/// Counts over the retained feedback events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionStats {
    pub total_events: usize,
    pub implicit_events: usize,
    pub explicit_events: usize,
    /// `implicit / total`, 0 when there are no events.
    pub implicit_ratio: f64,
    pub by_kind: BTreeMap<FeedbackKind, usize>,
}

impl InteractionStats {
    /// Linear scan of `events`.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a FeedbackEvent>) -> Self {
        let mut stats = Self::default();
        for event in events {
            stats.total_events += 1;
            if event.kind.is_explicit() {
                stats.explicit_events += 1;
            } else {
                stats.implicit_events += 1;
            }
            *stats.by_kind.entry(event.kind).or_insert(0) += 1;
        }
        if stats.total_events > 0 {
            stats.implicit_ratio = stats.implicit_events as f64 / stats.total_events as f64;
        }
        stats
    }

    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}
