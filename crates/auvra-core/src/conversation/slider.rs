use serde::{Deserialize, Serialize};

use crate::presentation::{bloating_label, tint_for, BloatingLabel, SliderValue, Tint};

/// Progress of the idle-mode slider prompt.
///
/// ```text
/// AwaitingSlider -> ConfirmingValue (dwell) -> ShowingTranscript
/// ```
///
/// `ShowingTranscript` is terminal for the lifetime of a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderPhase {
    #[default]
    AwaitingSlider,
    ConfirmingValue,
    ShowingTranscript,
}

/// A slider tap together with its derived label and tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderReading {
    pub value: SliderValue,
    pub label: BloatingLabel,
    pub tint: Tint,
}

impl SliderReading {
    pub fn new(value: SliderValue) -> Self {
        Self {
            value,
            label: bloating_label(value),
            tint: tint_for(value),
        }
    }

    /// The user message recorded for this reading, e.g. `7 = Strong bloating`.
    pub fn summary(&self) -> String {
        format!("{} = {} bloating", self.value, self.label)
    }
}
