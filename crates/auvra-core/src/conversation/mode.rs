use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The input surface currently shown on the check-in screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Slider prompt, then the slider transcript.
    #[default]
    Idle,
    /// Free-text entry.
    Type,
    /// Tap-to-select reasons.
    Tap,
    /// Press-and-hold voice recording.
    Yap,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Idle, Mode::Type, Mode::Tap, Mode::Yap];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Type => "type",
            Mode::Tap => "tap",
            Mode::Yap => "yap",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(Mode::Idle),
            "type" => Ok(Mode::Type),
            "tap" => Ok(Mode::Tap),
            "yap" | "voice" => Ok(Mode::Yap),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown mode '{other}'"),
            }),
        }
    }
}
