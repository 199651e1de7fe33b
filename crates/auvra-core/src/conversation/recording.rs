//! Voice recording session.
//!
//! ```text
//! Idle -> Recording (press) -> Complete (release) -> Idle (send / new recording)
//! ```
//!
//! The session holds the handle of its repeating tick so the owner can
//! cancel it deterministically on stop or teardown.

use serde::{Deserialize, Serialize};

use super::scheduler::TaskHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingPhase {
    #[default]
    Idle,
    Recording,
    Complete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingSession {
    phase: RecordingPhase,
    elapsed_seconds: u32,
    #[serde(skip)]
    tick: Option<TaskHandle>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RecordingPhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.phase == RecordingPhase::Recording
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RecordingPhase::Complete
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn tick_handle(&self) -> Option<TaskHandle> {
        self.tick
    }

    /// Begin recording with the given tick task. A finished but unsent
    /// recording is discarded. Returns false if already recording.
    pub fn start(&mut self, tick: TaskHandle) -> bool {
        if self.is_recording() {
            return false;
        }
        self.phase = RecordingPhase::Recording;
        self.elapsed_seconds = 0;
        self.tick = Some(tick);
        true
    }

    /// Stop recording, returning the tick handle that must be cancelled.
    pub fn stop(&mut self) -> Option<TaskHandle> {
        if !self.is_recording() {
            return None;
        }
        self.phase = RecordingPhase::Complete;
        self.tick.take()
    }

    /// Count one elapsed second. Ignored unless recording.
    pub fn on_tick(&mut self) -> Option<u32> {
        if !self.is_recording() {
            return None;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Some(self.elapsed_seconds)
    }

    /// Return to idle, discarding the counter. Yields any live tick handle.
    pub fn reset(&mut self) -> Option<TaskHandle> {
        self.phase = RecordingPhase::Idle;
        self.elapsed_seconds = 0;
        self.tick.take()
    }
}
