//! Mutable rewards state: the claimed set and the current streak.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::catalog::{RewardCatalog, RewardDefinition, RewardState};
use super::tiers::{Tier, TierPolicy};
use crate::error::ValidationError;
use crate::events::Event;
use crate::presentation::streak_label;
use crate::storage::RewardsConfig;

/// A reward with everything needed to render its card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub state: RewardState,
    pub tier: String,
    pub progress: f64,
    pub streak_label: String,
    pub action_label: Option<String>,
}

/// One section of the rewards list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierGroup {
    pub tier: String,
    pub rewards: Vec<RewardView>,
}

#[derive(Debug, Clone)]
pub struct RewardBook {
    catalog: RewardCatalog,
    policy: TierPolicy,
    claimed: BTreeSet<String>,
    current_streak_days: u32,
}

impl RewardBook {
    pub fn new(catalog: RewardCatalog, policy: TierPolicy, current_streak_days: u32) -> Self {
        Self {
            catalog,
            policy,
            claimed: BTreeSet::new(),
            current_streak_days,
        }
    }

    /// Default catalog with tiers and starting streak from configuration.
    pub fn from_config(config: &RewardsConfig) -> Result<Self, ValidationError> {
        let policy = TierPolicy::new(config.tiers.clone())?;
        Ok(Self::new(
            RewardCatalog::default(),
            policy,
            config.current_streak_days,
        ))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &RewardCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    pub fn current_streak_days(&self) -> u32 {
        self.current_streak_days
    }

    pub fn claimed_ids(&self) -> impl Iterator<Item = &str> {
        self.claimed.iter().map(String::as_str)
    }

    /// Effective state: claimed if in the claimed set or authored as
    /// claimed, else available once the streak meets the requirement.
    pub fn classify(&self, reward: &RewardDefinition) -> RewardState {
        if self.claimed.contains(&reward.id) || reward.base_state == RewardState::Claimed {
            RewardState::Claimed
        } else if self.current_streak_days >= reward.required_streak_days {
            RewardState::Available
        } else {
            RewardState::InProgress
        }
    }

    pub fn state_of(&self, reward_id: &str) -> Result<RewardState, ValidationError> {
        Ok(self.classify(self.catalog.get(reward_id)?))
    }

    pub fn tier_for(&self, reward: &RewardDefinition) -> &Tier {
        self.policy
            .tier_for(reward.required_streak_days, self.classify(reward))
    }

    /// Fill of the reward's progress bar in `[0, 1]`. Unlocked rewards are full.
    pub fn progress_fraction(&self, reward: &RewardDefinition) -> f64 {
        match self.classify(reward) {
            RewardState::Claimed | RewardState::Available => 1.0,
            RewardState::InProgress => {
                if reward.required_streak_days == 0 {
                    return 1.0;
                }
                (self.current_streak_days as f64 / reward.required_streak_days as f64).min(1.0)
            }
        }
    }

    pub fn view(&self, reward: &RewardDefinition) -> RewardView {
        RewardView {
            id: reward.id.clone(),
            title: reward.title.clone(),
            description: reward.description.clone(),
            icon: reward.icon.clone(),
            state: self.classify(reward),
            tier: self.tier_for(reward).name.clone(),
            progress: self.progress_fraction(reward),
            streak_label: streak_label(reward.required_streak_days),
            action_label: reward.action_label.clone(),
        }
    }

    pub fn views(&self) -> Vec<RewardView> {
        self.catalog.iter().map(|r| self.view(r)).collect()
    }

    /// Rewards grouped by tier, in tier order. Empty tiers are omitted and
    /// catalog order is kept within a tier.
    pub fn grouped(&self) -> Vec<TierGroup> {
        let views = self.views();
        self.policy
            .tiers()
            .iter()
            .filter_map(|tier| {
                let rewards: Vec<RewardView> = views
                    .iter()
                    .filter(|v| v.tier == tier.name)
                    .cloned()
                    .collect();
                (!rewards.is_empty()).then(|| TierGroup {
                    tier: tier.name.clone(),
                    rewards,
                })
            })
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add `reward_id` to the claimed set. Idempotent; does not check that
    /// the reward is available or even in the catalog.
    pub fn claim(&mut self, reward_id: &str) -> Event {
        let newly_claimed = self.claimed.insert(reward_id.to_string());
        tracing::debug!(reward_id, newly_claimed, "reward claimed");
        Event::RewardClaimed {
            reward_id: reward_id.to_string(),
            newly_claimed,
            at: Utc::now(),
        }
    }

    pub fn set_streak(&mut self, days: u32) -> Event {
        let before: Vec<RewardState> = self.catalog.iter().map(|r| self.classify(r)).collect();
        let from = self.current_streak_days;
        self.current_streak_days = days;

        let unlocked = self
            .catalog
            .iter()
            .zip(before)
            .filter(|(r, was)| {
                *was == RewardState::InProgress && self.classify(r) == RewardState::Available
            })
            .map(|(r, _)| r.id.clone())
            .collect::<Vec<_>>();

        if !unlocked.is_empty() {
            tracing::debug!(from, to = days, ?unlocked, "rewards unlocked");
        }
        Event::StreakChanged {
            from,
            to: days,
            unlocked,
            at: Utc::now(),
        }
    }

    pub fn advance_streak(&mut self, days: u32) -> Event {
        self.set_streak(self.current_streak_days.saturating_add(days))
    }
}

impl Default for RewardBook {
    fn default() -> Self {
        Self::new(RewardCatalog::default(), TierPolicy::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(required: u32, streak: u32) -> RewardBook {
        let catalog =
            RewardCatalog::new(vec![RewardDefinition::new("r", "Reward", "", "*", required)])
                .unwrap();
        RewardBook::new(catalog, TierPolicy::default(), streak)
    }

    #[test]
    fn unlocks_when_streak_reaches_requirement() {
        let mut book = single(7, 5);
        assert_eq!(book.state_of("r").unwrap(), RewardState::InProgress);
        book.set_streak(7);
        assert_eq!(book.state_of("r").unwrap(), RewardState::Available);
    }

    #[test]
    fn authored_claimed_stays_claimed() {
        let book = RewardBook::new(RewardCatalog::default(), TierPolicy::default(), 0);
        assert_eq!(book.state_of("1").unwrap(), RewardState::Claimed);
    }

    #[test]
    fn claim_is_idempotent_and_unchecked() {
        let mut book = single(30, 1);
        assert!(matches!(
            book.claim("r"),
            Event::RewardClaimed { newly_claimed: true, .. }
        ));
        assert!(matches!(
            book.claim("r"),
            Event::RewardClaimed { newly_claimed: false, .. }
        ));
        assert_eq!(book.claimed_ids().collect::<Vec<_>>(), vec!["r"]);
        assert_eq!(book.state_of("r").unwrap(), RewardState::Claimed);
    }

    #[test]
    fn progress_is_capped_and_full_when_unlocked() {
        let book = single(10, 4);
        let reward = book.catalog().get("r").unwrap().clone();
        assert!((book.progress_fraction(&reward) - 0.4).abs() < 1e-9);

        let book = single(10, 25);
        assert_eq!(book.progress_fraction(&reward), 1.0);
    }

    #[test]
    fn reward_jumps_to_first_tier_when_unlocked() {
        let mut book = single(20, 10);
        let reward = book.catalog().get("r").unwrap().clone();
        assert_eq!(book.tier_for(&reward).name, "Grow");
        book.set_streak(20);
        assert_eq!(book.tier_for(&reward).name, "Seed");
    }

    #[test]
    fn set_streak_reports_unlocked_rewards() {
        let mut book = RewardBook::new(RewardCatalog::default(), TierPolicy::default(), 9);
        match book.set_streak(16) {
            Event::StreakChanged { from, to, unlocked, .. } => {
                assert_eq!((from, to), (9, 16));
                assert_eq!(unlocked, vec!["3", "4", "5", "7", "8"]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn grouped_by_threshold_at_nine_days() {
        let book = RewardBook::new(RewardCatalog::default(), TierPolicy::default(), 9);
        let groups = book.grouped();
        let layout: Vec<(String, Vec<String>)> = groups
            .iter()
            .map(|g| (g.tier.clone(), g.rewards.iter().map(|r| r.id.clone()).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (
                    "Seed".to_string(),
                    vec!["1", "2", "3", "4", "7", "8"].into_iter().map(String::from).collect()
                ),
                (
                    "Grow".to_string(),
                    vec!["5", "6", "9", "10"].into_iter().map(String::from).collect()
                ),
            ]
        );
    }

    #[test]
    fn grouped_partitions_the_catalog() {
        let policy = TierPolicy::new(vec![
            Tier::new("Seed", 0),
            Tier::new("Grow", 13),
            Tier::new("Rise", 17),
        ])
        .unwrap();
        let book = RewardBook::new(RewardCatalog::default(), policy, 9);
        let listed: usize = book.grouped().iter().map(|g| g.rewards.len()).sum();
        assert_eq!(listed, book.catalog().len());
    }
}
