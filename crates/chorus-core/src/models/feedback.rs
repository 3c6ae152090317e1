use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ContextSnapshot, RoleType};
use crate::errors::ChorusError;

/// Kind of feedback signal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeedbackKind {
    /// Inferred: the user's speech appears to follow from the comment.
    Pickup,
    Click,
    ThumbsUp,
    ThumbsDown,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 4] = [
        FeedbackKind::Pickup,
        FeedbackKind::Click,
        FeedbackKind::ThumbsUp,
        FeedbackKind::ThumbsDown,
    ];

    /// Everything except pickup comes from a deliberate user action.
    pub fn is_explicit(self) -> bool {
        !matches!(self, FeedbackKind::Pickup)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Pickup => "pickup",
            FeedbackKind::Click => "click",
            FeedbackKind::ThumbsUp => "thumbs_up",
            FeedbackKind::ThumbsDown => "thumbs_down",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = ChorusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ChorusError::InvalidFeedback {
                reason: format!("unknown feedback kind: {s:?}"),
            })
    }
}

/// A single feedback signal about an emitted comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedbackEvent {
    pub comment_id: String,
    pub role: RoleType,
    pub kind: FeedbackKind,
    /// [0, 1]
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<String>,
    pub context: Option<ContextSnapshot>,
}
