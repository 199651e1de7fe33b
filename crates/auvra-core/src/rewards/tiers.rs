use serde::{Deserialize, Serialize};

use super::catalog::RewardState;
use crate::error::ValidationError;

/// A named section of the rewards list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    /// In-progress rewards requiring at least this many streak days land here.
    pub min_required_days: u32,
}

impl Tier {
    pub fn new(name: impl Into<String>, min_required_days: u32) -> Self {
        Self {
            name: name.into(),
            min_required_days,
        }
    }
}

/// Assigns rewards to tiers.
///
/// Claimed and available rewards always collapse into the first tier.
/// In-progress rewards go to the last tier whose boundary they meet, so a
/// reward can jump to the first tier as soon as the streak unlocks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    tiers: Vec<Tier>,
}

impl TierPolicy {
    /// Build a policy from tiers in any order. The lowest boundary is
    /// treated as zero so every reward has a tier.
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, ValidationError> {
        if tiers.is_empty() {
            return Err(ValidationError::EmptyCollection("reward tiers".into()));
        }
        tiers.sort_by_key(|t| t.min_required_days);
        if tiers
            .windows(2)
            .any(|pair| pair[0].min_required_days == pair[1].min_required_days)
        {
            return Err(ValidationError::InvalidValue {
                field: "rewards.tiers".into(),
                message: "tier boundaries must be distinct".into(),
            });
        }
        let duplicate = {
            let mut names = std::collections::BTreeSet::new();
            tiers
                .iter()
                .find(|t| !names.insert(t.name.as_str()))
                .map(|t| t.name.clone())
        };
        if let Some(name) = duplicate {
            return Err(ValidationError::InvalidValue {
                field: "rewards.tiers".into(),
                message: format!("duplicate tier name '{name}'"),
            });
        }
        tiers[0].min_required_days = 0;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn first(&self) -> &Tier {
        // Non-empty by construction.
        &self.tiers[0]
    }

    pub fn tier_for(&self, required_streak_days: u32, state: RewardState) -> &Tier {
        if state != RewardState::InProgress {
            return self.first();
        }
        self.tiers
            .iter()
            .rev()
            .find(|t| required_streak_days >= t.min_required_days)
            .unwrap_or_else(|| self.first())
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![Tier::new("Seed", 0), Tier::new("Grow", 16)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_uses_threshold() {
        let policy = TierPolicy::default();
        assert_eq!(policy.tier_for(15, RewardState::InProgress).name, "Seed");
        assert_eq!(policy.tier_for(16, RewardState::InProgress).name, "Grow");
    }

    #[test]
    fn unlocked_rewards_collapse_into_first_tier() {
        let policy = TierPolicy::default();
        assert_eq!(policy.tier_for(28, RewardState::Available).name, "Seed");
        assert_eq!(policy.tier_for(28, RewardState::Claimed).name, "Seed");
    }

    #[test]
    fn new_sorts_and_anchors_at_zero() {
        let policy = TierPolicy::new(vec![
            Tier::new("Rise", 60),
            Tier::new("Seed", 5),
            Tier::new("Grow", 30),
        ])
        .unwrap();
        let names: Vec<&str> = policy.tiers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Seed", "Grow", "Rise"]);
        assert_eq!(policy.first().min_required_days, 0);
        assert_eq!(policy.tier_for(2, RewardState::InProgress).name, "Seed");
    }

    #[test]
    fn rejects_empty_and_duplicate_boundaries() {
        assert!(TierPolicy::new(Vec::new()).is_err());
        assert!(TierPolicy::new(vec![Tier::new("A", 3), Tier::new("B", 3)]).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = TierPolicy::new(vec![Tier::new("Seed", 0), Tier::new("Seed", 16)]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }
}
