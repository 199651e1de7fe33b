//! # Auvra Core Library
//!
//! Headless state for the Auvra weekly check-in: the conversational
//! check-in screen and the rewards progression screen. Nothing here
//! renders; hosts feed gestures in and render from the returned events.
//!
//! ## Architecture
//!
//! - **Conversation**: a controller that owns the active input mode, one
//!   transcript per mode, and the slider, choice and recording sub-state.
//!   It has no internal threads; the caller advances its clock and
//!   scheduled work fires inside that call.
//! - **Rewards**: pure classification of a reward catalog against a
//!   claimed set and streak length, grouped into display tiers.
//! - **Storage**: TOML configuration for timing, script and rewards input.
//!
//! ## Key Components
//!
//! - [`ConversationController`]: check-in screen state machine
//! - [`RewardBook`]: rewards classification and tiering
//! - [`NavStack`]: route stack between screens
//! - [`Config`]: application configuration management

pub mod conversation;
pub mod error;
pub mod events;
pub mod navigation;
pub mod presentation;
pub mod rewards;
pub mod storage;

pub use conversation::{
    ChoiceCatalog, ChoiceOption, ConversationController, ConversationSettings, Message,
    MessageSink, Mode, RecordingPhase, SliderPhase, SliderReading, Transcript,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use navigation::{NavStack, Route};
pub use presentation::{bloating_label, format_elapsed, tint_for, BloatingLabel, SliderValue, Tint};
pub use rewards::{
    MilestoneTrack, RewardBook, RewardCatalog, RewardDefinition, RewardState, Tier, TierPolicy,
};
pub use storage::Config;
