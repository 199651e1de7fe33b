use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::{Message, Mode, RecordingPhase, SliderPhase, SliderReading};
use crate::navigation::Route;

/// Every state change in the system produces an Event.
/// Hosts render from events; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ModeChanged {
        from: Mode,
        to: Mode,
        /// Pending tasks of the mode being left that were cancelled.
        cancelled_tasks: usize,
        at: DateTime<Utc>,
    },
    MessageAppended {
        mode: Mode,
        message: Message,
        at: DateTime<Utc>,
    },
    DraftChanged {
        len: usize,
        at: DateTime<Utc>,
    },
    ChoiceToggled {
        option_id: String,
        selected: bool,
        at: DateTime<Utc>,
    },
    RecordingStarted {
        at: DateTime<Utc>,
    },
    RecordingTicked {
        elapsed_seconds: u32,
        at: DateTime<Utc>,
    },
    RecordingStopped {
        elapsed_seconds: u32,
        at: DateTime<Utc>,
    },
    RecordingSent {
        message: Message,
        elapsed_seconds: u32,
        at: DateTime<Utc>,
    },
    SliderSelected {
        reading: SliderReading,
        at: DateTime<Utc>,
    },
    /// The idle-mode confirmation dwell ended and the transcript is shown.
    TranscriptRevealed {
        reading: SliderReading,
        messages: Vec<Message>,
        at: DateTime<Utc>,
    },
    ScrollRequested {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// Controller teardown cancelled outstanding work.
    TasksCancelled {
        count: usize,
        at: DateTime<Utc>,
    },
    RewardClaimed {
        reward_id: String,
        /// False when the id was already in the claimed set.
        newly_claimed: bool,
        at: DateTime<Utc>,
    },
    StreakChanged {
        from: u32,
        to: u32,
        /// Rewards that moved from in-progress to available.
        unlocked: Vec<String>,
        at: DateTime<Utc>,
    },
    RoutePushed {
        route: Route,
        depth: usize,
        at: DateTime<Utc>,
    },
    RoutePopped {
        route: Route,
        depth: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        slider_phase: SliderPhase,
        reading: Option<SliderReading>,
        draft: String,
        selected_choices: Vec<String>,
        recording: RecordingPhase,
        elapsed_seconds: u32,
        transcript_len: usize,
        pending_tasks: usize,
        clock_ms: u64,
        at: DateTime<Utc>,
    },
}
