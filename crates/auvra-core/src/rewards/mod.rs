//! Rewards progression model.
//!
//! Given a static reward catalog, the user's claimed set and the current
//! streak length, classify every reward and group them into display tiers.
//! Classification is a pure function of those three inputs.

mod book;
mod catalog;
mod gradient;
mod milestone;
mod tiers;

pub use book::{RewardBook, RewardView, TierGroup};
pub use catalog::{RewardCatalog, RewardDefinition, RewardState};
pub use gradient::{gradient_stops, GradientStop, BRAND_GRADIENT};
pub use milestone::{Milestone, MilestoneStatus, MilestoneTrack};
pub use tiers::{Tier, TierPolicy};
