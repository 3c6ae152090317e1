use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ContextSnapshot, FeedbackKind, RoleType};

/// Which generation path produced a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CommentSource {
    RuleBased,
    Generative,
    /// Synthetic neutral comment used when no role matched.
    Filler,
}

/// Interaction attached to a comment after emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interaction {
    pub kind: FeedbackKind,
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

/// An emitted comment-like utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    pub id: String,
    pub role: RoleType,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub source_context: ContextSnapshot,
    pub source: CommentSource,
    pub interaction: Option<Interaction>,
}

impl Comment {
    pub fn new(
        role: RoleType,
        content: impl Into<String>,
        source: CommentSource,
        context: &ContextSnapshot,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at,
            source_context: context.clone(),
            source,
            interaction: None,
        }
    }
}
