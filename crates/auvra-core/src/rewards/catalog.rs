use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardState {
    Claimed,
    Available,
    InProgress,
}

impl RewardState {
    pub fn as_str(self) -> &'static str {
        match self {
            RewardState::Claimed => "claimed",
            RewardState::Available => "available",
            RewardState::InProgress => "in_progress",
        }
    }
}

/// An authored reward. Not user-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    pub required_streak_days: u32,
    /// State as authored; only `Claimed` affects classification.
    pub base_state: RewardState,
    /// Call-to-action shown on the reward card, if any.
    #[serde(default)]
    pub action_label: Option<String>,
}

impl RewardDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        required_streak_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            required_streak_days,
            base_state: RewardState::InProgress,
            action_label: None,
        }
    }

    pub fn with_base_state(mut self, state: RewardState) -> Self {
        self.base_state = state;
        self
    }

    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCatalog {
    rewards: Vec<RewardDefinition>,
}

impl RewardCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(rewards: Vec<RewardDefinition>) -> Result<Self, ValidationError> {
        let mut seen = BTreeSet::new();
        for reward in &rewards {
            if !seen.insert(reward.id.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: "reward.id".into(),
                    message: format!("duplicate id '{}'", reward.id),
                });
            }
        }
        Ok(Self { rewards })
    }

    pub fn get(&self, id: &str) -> Result<&RewardDefinition, ValidationError> {
        self.rewards
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ValidationError::UnknownReward(id.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RewardDefinition> {
        self.rewards.iter()
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

/// The shipped rewards with their authored streak requirements. Tiers are
/// not authored here: [`TierPolicy`](super::TierPolicy) places each reward
/// from its requirement, so with the default 16-day boundary "Cuisine
/// preferences" (12) and "Dine out habits" (14) sit in the first tier.
impl Default for RewardCatalog {
    fn default() -> Self {
        let rewards = vec![
            RewardDefinition::new("1", "Streak freeze", "", "🧊", 7)
                .with_base_state(RewardState::Claimed),
            RewardDefinition::new("2", "Diet preferences", "", "🥗", 7)
                .with_base_state(RewardState::Available)
                .with_action("Personalize now"),
            RewardDefinition::new(
                "3",
                "Food Allergies",
                "Skip foods that don't work for your body",
                "🥜",
                12,
            ),
            RewardDefinition::new(
                "4",
                "Symptom patterns unlocked",
                "Understand your bodily trends",
                "✨",
                14,
            ),
            RewardDefinition::new(
                "5",
                "2x plan refresh",
                "Additional refreshes for the action plan",
                "🧊",
                16,
            ),
            RewardDefinition::new(
                "6",
                "Ethnicity/cultural habits",
                "Tailor the plan to your traditions & lifestyle",
                "🌏",
                18,
            ),
            RewardDefinition::new(
                "7",
                "Cuisine preferences",
                "The plan adapts to your favorite cuisines",
                "🥘",
                12,
            ),
            RewardDefinition::new(
                "8",
                "Dine out habits",
                "Healthier alternatives to your fav order",
                "🍔",
                14,
            ),
            RewardDefinition::new(
                "9",
                "BMI/Waist to height ratio",
                "Adjust actions to your body's unique profile",
                "⚖️",
                18,
            ),
            RewardDefinition::new(
                "10",
                "First signs of improvement",
                "Start to feel relief for top concerns",
                "✨",
                21,
            ),
        ];
        Self { rewards }
    }
}
