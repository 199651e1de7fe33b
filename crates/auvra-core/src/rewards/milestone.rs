use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub day_threshold: u32,
}

impl Milestone {
    pub fn new(name: impl Into<String>, day_threshold: u32) -> Self {
        Self {
            name: name.into(),
            day_threshold,
        }
    }

    pub fn day_label(&self) -> String {
        format!("Day {}", self.day_threshold)
    }
}

/// A milestone as displayed for a given streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub name: String,
    pub day_label: String,
    pub day_threshold: u32,
    pub is_reached: bool,
    /// At most one milestone is active: the highest one reached.
    pub is_active: bool,
}

/// Ascending milestone track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTrack {
    milestones: Vec<Milestone>,
}

impl MilestoneTrack {
    pub fn new(mut milestones: Vec<Milestone>) -> Result<Self, ValidationError> {
        if milestones.is_empty() {
            return Err(ValidationError::EmptyCollection("milestones".into()));
        }
        milestones.sort_by_key(|m| m.day_threshold);
        if milestones
            .windows(2)
            .any(|pair| pair[0].day_threshold == pair[1].day_threshold)
        {
            return Err(ValidationError::InvalidValue {
                field: "milestones".into(),
                message: "day thresholds must be distinct".into(),
            });
        }
        Ok(Self { milestones })
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// The highest milestone reached, if any.
    pub fn active(&self, streak_days: u32) -> Option<&Milestone> {
        self.milestones
            .iter()
            .rev()
            .find(|m| streak_days >= m.day_threshold)
    }

    pub fn next(&self, streak_days: u32) -> Option<&Milestone> {
        self.milestones
            .iter()
            .find(|m| m.day_threshold > streak_days)
    }

    pub fn days_until_next(&self, streak_days: u32) -> Option<u32> {
        self.next(streak_days)
            .map(|m| m.day_threshold - streak_days)
    }

    pub fn statuses(&self, streak_days: u32) -> Vec<MilestoneStatus> {
        let active = self
            .milestones
            .iter()
            .rposition(|m| streak_days >= m.day_threshold);
        self.milestones
            .iter()
            .enumerate()
            .map(|(i, m)| MilestoneStatus {
                name: m.name.clone(),
                day_label: m.day_label(),
                day_threshold: m.day_threshold,
                is_reached: streak_days >= m.day_threshold,
                is_active: Some(i) == active,
            })
            .collect()
    }
}

impl Default for MilestoneTrack {
    fn default() -> Self {
        Self {
            milestones: vec![
                Milestone::new("Seed", 7),
                Milestone::new("Grow", 30),
                Milestone::new("Rise", 60),
                Milestone::new("Peak", 180),
                Milestone::new("Glow", 270),
            ],
        }
    }
}
