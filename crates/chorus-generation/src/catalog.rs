//! Static role table: utterance pools and trigger predicates per role.

use serde::{Deserialize, Serialize};

use chorus_core::models::{RoleType, RoleWeights};

use crate::trigger::{Comparison, Trigger};

/// One comment category.
///
/// `weight` is a static prior multiplied with the user's learned weight when
/// roles are scored. A role is eligible when every trigger matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_type: RoleType,
    pub weight: f64,
    pub utterances: Vec<String>,
    pub triggers: Vec<Trigger>,
}

impl Role {
    pub fn new(role_type: RoleType, utterances: &[&str], triggers: Vec<Trigger>) -> Self {
        Self {
            role_type,
            weight: 1.0,
            utterances: utterances.iter().map(|u| u.to_string()).collect(),
            triggers,
        }
    }
}

/// Ordered role table. Order breaks scoring ties.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl RoleCatalog {
    /// Custom catalog. Roles keep the given order; non-positive weights become 1.0.
    pub fn new(roles: Vec<Role>) -> Self {
        let roles = roles
            .into_iter()
            .map(|mut role| {
                if !(role.weight.is_finite() && role.weight > 0.0) {
                    role.weight = 1.0;
                }
                role
            })
            .collect();
        Self { roles }
    }

    /// The built-in table covering all eight roles.
    pub fn default_catalog() -> Self {
        use Comparison::{AtLeast, AtMost};

        Self::new(vec![
            Role::new(
                RoleType::Greeting,
                &["Good morning!", "Morning! Nice to hear you.", "Hey there, good morning!"],
                vec![
                    Trigger::HourOfDay { start: 5, end: 11 },
                    Trigger::keywords(&["hello", "hi", "hey", "good morning", "morning"]),
                ],
            ),
            Role::new(
                RoleType::Reaction,
                &["Whoa!", "No way!", "That's wild!", "Haha, really?"],
                vec![Trigger::Volume { op: AtLeast, value: 0.6 }],
            ),
            Role::new(
                RoleType::Question,
                &["Ooh, good question.", "Hmm, what do you think?", "I'd like to know too!"],
                vec![Trigger::keywords(&["why", "how", "what", "wonder", "maybe"])],
            ),
            Role::new(
                RoleType::Agreement,
                &["Totally agree.", "So true.", "Right?!"],
                vec![
                    Trigger::Engagement { op: AtLeast, value: 0.5 },
                    Trigger::keywords(&["think", "believe", "right", "agree", "true"]),
                ],
            ),
            Role::new(
                RoleType::Encouragement,
                &["You've got this!", "Keep going!", "We're listening!"],
                vec![
                    Trigger::Engagement { op: AtMost, value: 0.35 },
                    Trigger::SilenceSeconds { op: AtMost, value: 3.0 },
                ],
            ),
            Role::new(
                RoleType::Humor,
                &["LOL", "Haha, classic.", "Okay that's hilarious."],
                vec![Trigger::keywords(&["lol", "funny", "haha", "joke", "laugh"])],
            ),
            Role::new(
                RoleType::TopicShift,
                &["Anything else on your mind?", "Wanna talk about something new?", "So, what's next?"],
                vec![Trigger::SilenceSeconds { op: AtLeast, value: 8.0 }],
            ),
            Role::new(
                RoleType::SilenceBreaker,
                &["Still there?", "Take your time.", "..."],
                vec![Trigger::SilenceSeconds { op: AtLeast, value: 3.0 }],
            ),
        ])
    }

    /// Replace the role priors with `weights`. Non-positive or non-finite
    /// entries leave the prior unchanged.
    pub fn set_weights(&mut self, weights: &RoleWeights) {
        for role in &mut self.roles {
            let weight = weights.get(role.role_type);
            if weight.is_finite() && weight > 0.0 {
                role.weight = weight;
            }
        }
    }

    pub fn role(&self, role_type: RoleType) -> Option<&Role> {
        self.roles.iter().find(|r| r.role_type == role_type)
    }

    /// Roles in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_every_role_in_order() {
        let catalog = RoleCatalog::default_catalog();
        let order: Vec<_> = catalog.iter().map(|r| r.role_type).collect();
        assert_eq!(order, RoleType::ALL.to_vec());
        assert!(catalog.iter().all(|r| !r.utterances.is_empty()));
        assert!(catalog.iter().all(|r| !r.triggers.is_empty()));
    }

    #[test]
    fn invalid_weights_are_reset() {
        let mut role = Role::new(RoleType::Humor, &["lol"], vec![]);
        role.weight = -3.0;
        let catalog = RoleCatalog::new(vec![role]);
        assert_eq!(catalog.role(RoleType::Humor).unwrap().weight, 1.0);
        assert!(catalog.role(RoleType::Greeting).is_none());
    }

    #[test]
    fn set_weights_replaces_priors() {
        let mut catalog = RoleCatalog::default_catalog();
        let weights = RoleWeights::neutral().with(RoleType::Question, 1.7, 0.1, 2.0);
        catalog.set_weights(&weights);
        assert_eq!(catalog.role(RoleType::Question).unwrap().weight, 1.7);
        assert_eq!(catalog.role(RoleType::Humor).unwrap().weight, 1.0);
    }
}
