use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::ChorusError;

/// The eight comment categories. Declaration order is catalog order and is
/// used to break scoring ties.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RoleType {
    Greeting,
    Reaction,
    Question,
    Agreement,
    Encouragement,
    Humor,
    TopicShift,
    SilenceBreaker,
}

impl RoleType {
    /// All roles in catalog order.
    pub const ALL: [RoleType; 8] = [
        RoleType::Greeting,
        RoleType::Reaction,
        RoleType::Question,
        RoleType::Agreement,
        RoleType::Encouragement,
        RoleType::Humor,
        RoleType::TopicShift,
        RoleType::SilenceBreaker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Greeting => "greeting",
            RoleType::Reaction => "reaction",
            RoleType::Question => "question",
            RoleType::Agreement => "agreement",
            RoleType::Encouragement => "encouragement",
            RoleType::Humor => "humor",
            RoleType::TopicShift => "topic_shift",
            RoleType::SilenceBreaker => "silence_breaker",
        }
    }

    /// Position in catalog order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = ChorusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleType::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| ChorusError::InvalidFeedback {
                reason: format!("unknown role: {s:?}"),
            })
    }
}
