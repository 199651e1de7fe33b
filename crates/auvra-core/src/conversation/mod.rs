//! Check-in conversation: four input modes over per-mode transcripts.

mod choices;
mod controller;
mod message;
mod mode;
mod recording;
mod scheduler;
mod sink;
mod slider;

pub use choices::{ChoiceCatalog, ChoiceOption, ChoiceSelection};
pub use controller::{ConversationController, ConversationSettings};
pub use message::{Message, Transcript};
pub use mode::Mode;
pub use recording::{RecordingPhase, RecordingSession};
pub use scheduler::{FiredTask, ScheduledAction, Scheduler, TaskHandle};
pub use sink::{MemorySink, MessageSink, TracingSink};
pub use slider::{SliderPhase, SliderReading};
