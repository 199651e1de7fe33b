//! Check-in conversation controller.
//!
//! Owns every piece of screen state: the active [`Mode`], one transcript per
//! mode, the type-mode draft, the tap-mode selection, the voice recording
//! session and the idle-mode slider phase. Hosts deliver gestures through
//! the command methods and drive time with [`ConversationController::advance`].
//!
//! ## Timed work
//!
//! Bot latency, the slider confirmation dwell, the recording tick and the
//! post-layout scroll are tasks on an internal [`Scheduler`], each bound to
//! the mode that created it. Leaving a mode cancels that mode's tasks, so a
//! delayed action can never land on a surface that is no longer shown.

use chrono::Utc;

use super::choices::{ChoiceCatalog, ChoiceSelection};
use super::message::{Message, Transcript};
use super::mode::Mode;
use super::recording::{RecordingPhase, RecordingSession};
use super::scheduler::{FiredTask, ScheduledAction, Scheduler, TaskHandle};
use super::sink::{MessageSink, TracingSink};
use super::slider::{SliderPhase, SliderReading};
use crate::events::Event;
use crate::presentation::SliderValue;
use crate::storage::{Config, ScriptConfig, TimingConfig};

/// Timing and script the controller runs with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSettings {
    pub timing: TimingConfig,
    pub script: ScriptConfig,
}

impl From<&Config> for ConversationSettings {
    fn from(config: &Config) -> Self {
        Self {
            timing: config.timing.clone(),
            script: config.script.clone(),
        }
    }
}

pub struct ConversationController {
    settings: ConversationSettings,
    catalog: ChoiceCatalog,
    mode: Mode,
    /// Indexed by [`slot`].
    transcripts: [Transcript; 4],
    draft: String,
    selection: ChoiceSelection,
    recording: RecordingSession,
    slider_phase: SliderPhase,
    reading: Option<SliderReading>,
    confirm_task: Option<TaskHandle>,
    scheduler: Scheduler,
    sink: Box<dyn MessageSink>,
}

fn slot(mode: Mode) -> usize {
    match mode {
        Mode::Idle => 0,
        Mode::Type => 1,
        Mode::Tap => 2,
        Mode::Yap => 3,
    }
}

impl ConversationController {
    /// Create a controller in idle mode, awaiting a slider reading.
    ///
    /// The type, tap and yap transcripts open with the intro question; the
    /// idle transcript stays empty until the slider reading is confirmed.
    pub fn new(settings: ConversationSettings) -> Self {
        let mut transcripts: [Transcript; 4] = Default::default();
        for mode in [Mode::Type, Mode::Tap, Mode::Yap] {
            transcripts[slot(mode)].push(Message::bot(settings.script.intro_question.clone()));
        }

        Self {
            settings,
            catalog: ChoiceCatalog::default(),
            mode: Mode::Idle,
            transcripts,
            draft: String::new(),
            selection: ChoiceSelection::new(),
            recording: RecordingSession::new(),
            slider_phase: SliderPhase::AwaitingSlider,
            reading: None,
            confirm_task: None,
            scheduler: Scheduler::new(),
            sink: Box::new(TracingSink),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ConversationSettings::from(config))
    }

    pub fn with_catalog(mut self, catalog: ChoiceCatalog) -> Self {
        self.catalog = catalog;
        self.selection.clear();
        self
    }

    pub fn with_sink(mut self, sink: impl MessageSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ChoiceCatalog {
        &self.catalog
    }

    pub fn intro_question(&self) -> &str {
        &self.settings.script.intro_question
    }

    pub fn transcript(&self, mode: Mode) -> &Transcript {
        &self.transcripts[slot(mode)]
    }

    pub fn active_transcript(&self) -> &Transcript {
        self.transcript(self.mode)
    }

    /// Whether the active mode's transcript is on screen. Idle mode shows
    /// the slider instead until the reading is confirmed.
    pub fn is_transcript_visible(&self) -> bool {
        self.mode != Mode::Idle || self.slider_phase == SliderPhase::ShowingTranscript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn selection(&self) -> &ChoiceSelection {
        &self.selection
    }

    pub fn recording(&self) -> &RecordingSession {
        &self.recording
    }

    pub fn slider_phase(&self) -> SliderPhase {
        self.slider_phase
    }

    pub fn reading(&self) -> Option<SliderReading> {
        self.reading
    }

    pub fn clock_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Milliseconds until the next scheduled task, if any.
    pub fn next_due_in_ms(&self) -> Option<u64> {
        self.scheduler
            .next_due_ms()
            .map(|due| due.saturating_sub(self.scheduler.now_ms()))
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            slider_phase: self.slider_phase,
            reading: self.reading,
            draft: self.draft.clone(),
            selected_choices: self.selection.ids(),
            recording: self.recording.phase(),
            elapsed_seconds: self.recording.elapsed_seconds(),
            transcript_len: self.active_transcript().len(),
            pending_tasks: self.scheduler.pending_count(),
            clock_ms: self.scheduler.now_ms(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to `next`. Any mode may follow any other. Pending work of the
    /// mode being left is cancelled, and a scroll of the new transcript is
    /// scheduled once it has had time to lay out.
    pub fn set_mode(&mut self, next: Mode) -> Event {
        let from = self.mode;
        let cancelled_tasks = if from != next { self.dismiss(from) } else { 0 };
        self.mode = next;
        self.schedule_scroll(next);

        tracing::debug!(%from, to = %next, cancelled_tasks, "mode changed");
        Event::ModeChanged {
            from,
            to: next,
            cancelled_tasks,
            at: Utc::now(),
        }
    }

    pub fn set_draft(&mut self, text: &str) -> Event {
        self.draft = text.to_string();
        Event::DraftChanged {
            len: self.draft.chars().count(),
            at: Utc::now(),
        }
    }

    /// Send typed text to the type transcript. Blank input is ignored.
    pub fn submit_text(&mut self, text: &str) -> Option<Event> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let message = self.append_user(Mode::Type, trimmed.to_string());
        self.draft.clear();
        Some(Event::MessageAppended {
            mode: Mode::Type,
            message,
            at: Utc::now(),
        })
    }

    pub fn submit_draft(&mut self) -> Option<Event> {
        let draft = std::mem::take(&mut self.draft);
        let event = self.submit_text(&draft);
        if event.is_none() {
            self.draft = draft;
        }
        event
    }

    /// Flip selection of a tap-mode reason. Ignored outside tap mode and
    /// for unknown ids.
    pub fn toggle_choice(&mut self, option_id: &str) -> Option<Event> {
        if self.mode != Mode::Tap {
            tracing::debug!(mode = %self.mode, option_id, "choice toggle outside tap mode");
            return None;
        }
        if !self.catalog.contains(option_id) {
            tracing::warn!(option_id, "ignoring toggle of unknown choice");
            return None;
        }
        let selected = self.selection.toggle(option_id);
        Some(Event::ChoiceToggled {
            option_id: option_id.to_string(),
            selected,
            at: Utc::now(),
        })
    }

    /// Send the selected reasons as one message and schedule the bot's
    /// follow-up. No-op outside tap mode or when nothing is selected.
    pub fn send_selected_choices(&mut self) -> Option<Event> {
        if self.mode != Mode::Tap || self.selection.is_empty() {
            return None;
        }
        let text = self.catalog.joined_labels(&self.selection);
        self.selection.clear();
        let message = self.append_user(Mode::Tap, text);

        let follow_up = self.settings.script.choice_follow_up.clone();
        self.scheduler.schedule_once(
            self.settings.timing.bot_reply_delay_ms,
            Mode::Tap,
            ScheduledAction::BotReply { text: follow_up },
        );

        Some(Event::MessageAppended {
            mode: Mode::Tap,
            message,
            at: Utc::now(),
        })
    }

    /// Start the voice recording tick. Only accepted in yap mode.
    pub fn start_recording(&mut self) -> Option<Event> {
        if self.mode != Mode::Yap || self.recording.is_recording() {
            return None;
        }
        let tick = self.scheduler.schedule_repeating(
            self.settings.timing.recording_tick_ms,
            Mode::Yap,
            ScheduledAction::RecordingTick,
        );
        self.recording.start(tick);
        tracing::debug!("recording started");
        Some(Event::RecordingStarted { at: Utc::now() })
    }

    pub fn stop_recording(&mut self) -> Option<Event> {
        let tick = self.recording.stop()?;
        self.scheduler.cancel(tick);
        let elapsed_seconds = self.recording.elapsed_seconds();
        tracing::debug!(elapsed_seconds, "recording stopped");
        Some(Event::RecordingStopped {
            elapsed_seconds,
            at: Utc::now(),
        })
    }

    /// Send the voice placeholder and reset the session. A recording still
    /// in progress is stopped first; with nothing recorded this is a no-op.
    pub fn send_recording(&mut self) -> Option<Event> {
        match self.recording.phase() {
            RecordingPhase::Idle => return None,
            RecordingPhase::Recording => {
                self.stop_recording();
            }
            RecordingPhase::Complete => {}
        }

        let elapsed_seconds = self.recording.elapsed_seconds();
        if let Some(tick) = self.recording.reset() {
            self.scheduler.cancel(tick);
        }
        let placeholder = self.settings.script.voice_placeholder.clone();
        let message = self.append_user(Mode::Yap, placeholder);

        Some(Event::RecordingSent {
            message,
            elapsed_seconds,
            at: Utc::now(),
        })
    }

    /// Record a slider tap and start the confirmation dwell. Only accepted
    /// in idle mode while the slider is still awaiting input.
    pub fn select_slider_value(&mut self, value: SliderValue) -> Option<Event> {
        if self.mode != Mode::Idle || self.slider_phase != SliderPhase::AwaitingSlider {
            return None;
        }
        let reading = SliderReading::new(value);
        self.reading = Some(reading);
        self.slider_phase = SliderPhase::ConfirmingValue;
        self.confirm_task = Some(self.scheduler.schedule_once(
            self.settings.timing.confirm_dwell_ms,
            Mode::Idle,
            ScheduledAction::RevealTranscript,
        ));

        tracing::debug!(value = value.get(), label = %reading.label, "slider value selected");
        Some(Event::SliderSelected {
            reading,
            at: Utc::now(),
        })
    }

    /// Move the clock forward, firing every task that comes due in order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<Event> {
        let until = self.scheduler.now_ms().saturating_add(delta_ms);
        let mut events = Vec::new();
        while let Some(fired) = self.scheduler.pop_due(until) {
            if let Some(event) = self.dispatch(fired) {
                events.push(event);
            }
        }
        events
    }

    /// Cancel all outstanding work. Call when the screen is dismissed.
    pub fn teardown(&mut self) -> Event {
        let count = self.scheduler.cancel_all().len();
        self.recording.stop();
        self.rollback_confirmation();
        tracing::debug!(count, "conversation torn down");
        Event::TasksCancelled {
            count,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn dispatch(&mut self, fired: FiredTask) -> Option<Event> {
        match fired.action {
            ScheduledAction::BotReply { text } => {
                let message = Message::bot(text);
                self.transcripts[slot(fired.scope)].push(message.clone());
                self.schedule_scroll(fired.scope);
                Some(Event::MessageAppended {
                    mode: fired.scope,
                    message,
                    at: Utc::now(),
                })
            }
            ScheduledAction::RevealTranscript => self.reveal_transcript(),
            ScheduledAction::RecordingTick => match self.recording.on_tick() {
                Some(elapsed_seconds) => Some(Event::RecordingTicked {
                    elapsed_seconds,
                    at: Utc::now(),
                }),
                None => {
                    tracing::warn!(task = fired.handle.id(), "cancelling orphaned recording tick");
                    self.scheduler.cancel(fired.handle);
                    None
                }
            },
            ScheduledAction::ScrollToBottom => Some(Event::ScrollRequested {
                mode: fired.scope,
                at: Utc::now(),
            }),
        }
    }

    fn reveal_transcript(&mut self) -> Option<Event> {
        self.confirm_task = None;
        let Some(reading) = self.reading else {
            tracing::warn!("confirmation dwell ended without a reading");
            self.slider_phase = SliderPhase::AwaitingSlider;
            return None;
        };
        self.slider_phase = SliderPhase::ShowingTranscript;

        let user = self.append_user(Mode::Idle, reading.summary());
        let bot = Message::bot(self.settings.script.slider_prompt.clone());
        self.transcripts[slot(Mode::Idle)].push(bot.clone());

        Some(Event::TranscriptRevealed {
            reading,
            messages: vec![user, bot],
            at: Utc::now(),
        })
    }

    /// Append a user message, hand it to the sink and scroll if visible.
    fn append_user(&mut self, mode: Mode, text: String) -> Message {
        self.sink.send(mode, &text);
        let message = Message::user(text);
        self.transcripts[slot(mode)].push(message.clone());
        if mode == self.mode {
            self.schedule_scroll(mode);
        }
        message
    }

    fn schedule_scroll(&mut self, mode: Mode) {
        self.scheduler.schedule_once(
            self.settings.timing.scroll_delay_ms,
            mode,
            ScheduledAction::ScrollToBottom,
        );
    }

    /// Cancel the pending work of a mode being left.
    fn dismiss(&mut self, mode: Mode) -> usize {
        let cancelled = self.scheduler.cancel_scope(mode).len();
        match mode {
            Mode::Idle => self.rollback_confirmation(),
            Mode::Yap => {
                // Tick already cancelled with the scope.
                self.recording.stop();
            }
            Mode::Type | Mode::Tap => {}
        }
        cancelled
    }

    /// An unconfirmed reading was never committed; forget it.
    fn rollback_confirmation(&mut self) {
        if self.slider_phase == SliderPhase::ConfirmingValue {
            if let Some(task) = self.confirm_task.take() {
                self.scheduler.cancel(task);
            }
            self.reading = None;
            self.slider_phase = SliderPhase::AwaitingSlider;
        }
    }
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new(ConversationSettings::default())
    }
}
