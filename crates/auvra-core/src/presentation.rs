//! Presentation values derived from conversation and reward state.
//!
//! These are pure lookups: labels for slider readings, the tint band a
//! reading falls into, and short human-readable strings for counters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A reading on the 1..=9 bloating scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SliderValue(u8);

impl SliderValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::SliderOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every value on the scale, ascending.
    pub fn all() -> impl Iterator<Item = SliderValue> {
        (Self::MIN..=Self::MAX).map(SliderValue)
    }
}

impl TryFrom<u8> for SliderValue {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SliderValue> for u8 {
    fn from(value: SliderValue) -> Self {
        value.0
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloatingLabel {
    None,
    Mild,
    Moderate,
    Strong,
    Extreme,
}

impl BloatingLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            BloatingLabel::None => "None",
            BloatingLabel::Mild => "Mild",
            BloatingLabel::Moderate => "Moderate",
            BloatingLabel::Strong => "Strong",
            BloatingLabel::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for BloatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a slider reading: 1 None, 2-3 Mild, 4-5 Moderate, 6-7 Strong, 8-9 Extreme.
pub fn bloating_label(value: SliderValue) -> BloatingLabel {
    match value.get() {
        1 => BloatingLabel::None,
        2 | 3 => BloatingLabel::Mild,
        4 | 5 => BloatingLabel::Moderate,
        6 | 7 => BloatingLabel::Strong,
        _ => BloatingLabel::Extreme,
    }
}

/// Color band over three equal-width groups of the 1..=9 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Calm,
    Elevated,
    Intense,
}

impl Tint {
    pub fn as_str(self) -> &'static str {
        match self {
            Tint::Calm => "calm",
            Tint::Elevated => "elevated",
            Tint::Intense => "intense",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Tint::Calm => "#A29AEA",
            Tint::Elevated => "#D482B9",
            Tint::Intense => "#E98BAC",
        }
    }
}

pub fn tint_for(value: SliderValue) -> Tint {
    match (value.get() - 1) / 3 {
        0 => Tint::Calm,
        1 => Tint::Elevated,
        _ => Tint::Intense,
    }
}

/// Elapsed seconds as `m:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn streak_label(days: u32) -> String {
    format!("{days} day streak")
}
