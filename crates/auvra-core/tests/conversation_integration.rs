//! Integration tests for the check-in conversation.
//!
//! Drives the controller through complete user flows the way a host would:
//! gestures in, clock advanced in one-second steps, events out.

use auvra_core::conversation::MemorySink;
use auvra_core::{
    BloatingLabel, ConversationController, Event, Mode, RecordingPhase, SliderPhase, SliderValue,
};
use proptest::prelude::*;

fn tick_seconds(controller: &mut ConversationController, seconds: u32) -> Vec<Event> {
    (0..seconds).flat_map(|_| controller.advance(1_000)).collect()
}

#[test]
fn test_slider_flow_reveals_transcript_after_dwell() {
    let mut c = ConversationController::default();

    c.select_slider_value(SliderValue::new(7).unwrap())
        .expect("slider accepted");
    assert_eq!(c.reading().unwrap().label, BloatingLabel::Strong);
    assert_eq!(c.slider_phase(), SliderPhase::ConfirmingValue);
    assert!(c.transcript(Mode::Idle).is_empty());

    let events = c.advance(1_000);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::TranscriptRevealed { .. })));
    assert_eq!(c.slider_phase(), SliderPhase::ShowingTranscript);
    assert!(c.is_transcript_visible());

    let idle = c.transcript(Mode::Idle).messages();
    assert_eq!(idle.len(), 2);
    assert_eq!(idle[0].text, "7 = Strong bloating");
    assert!(!idle[0].is_bot);
    assert!(idle[1].is_bot);
    assert_eq!(idle[1].text, c.settings().script.slider_prompt);
}

#[test]
fn test_slider_cannot_be_reentered_after_reveal() {
    let mut c = ConversationController::default();
    c.select_slider_value(SliderValue::new(2).unwrap());
    c.advance(1_000);

    assert!(c.select_slider_value(SliderValue::new(8).unwrap()).is_none());
    c.set_mode(Mode::Tap);
    c.set_mode(Mode::Idle);
    assert_eq!(c.slider_phase(), SliderPhase::ShowingTranscript);
    assert!(c.select_slider_value(SliderValue::new(8).unwrap()).is_none());
}

#[test]
fn test_recording_five_seconds_then_send() {
    let mut c = ConversationController::default();
    c.set_mode(Mode::Yap);
    let before = c.transcript(Mode::Yap).len();

    c.start_recording().expect("recording started");
    let ticks = tick_seconds(&mut c, 5)
        .into_iter()
        .filter(|e| matches!(e, Event::RecordingTicked { .. }))
        .count();
    assert_eq!(ticks, 5);

    c.stop_recording().expect("recording stopped");
    assert_eq!(c.recording().elapsed_seconds(), 5);
    assert!(!c.recording().is_recording());
    assert!(c.recording().is_complete());

    // No orphaned tick after stopping.
    tick_seconds(&mut c, 3);
    assert_eq!(c.recording().elapsed_seconds(), 5);

    c.send_recording().expect("recording sent");
    let yap = c.transcript(Mode::Yap);
    assert_eq!(yap.len(), before + 1);
    assert_eq!(yap.last().unwrap().text, "Voice message");
    assert!(!yap.last().unwrap().is_bot);
    assert_eq!(c.recording().elapsed_seconds(), 0);
    assert_eq!(c.recording().phase(), RecordingPhase::Idle);
}

#[test]
fn test_empty_choice_send_is_noop() {
    let mut c = ConversationController::default();
    c.set_mode(Mode::Tap);
    let before = c.transcript(Mode::Tap).len();

    assert!(c.send_selected_choices().is_none());
    assert_eq!(c.transcript(Mode::Tap).len(), before);
    assert!(c.selection().is_empty());
    assert_eq!(c.advance(10_000).len(), 1); // only the mode-switch scroll
}

#[test]
fn test_full_session_across_modes() {
    let sink = MemorySink::new();
    let mut c = ConversationController::default().with_sink(sink.clone());

    c.select_slider_value(SliderValue::new(4).unwrap());
    c.advance(1_000);

    c.set_mode(Mode::Tap);
    c.toggle_choice("ate_out");
    c.toggle_choice("poor_sleep");
    c.toggle_choice("ate_out");
    c.send_selected_choices();
    c.advance(500);

    c.set_mode(Mode::Type);
    c.submit_text("  mostly after dinner ");

    let tap: Vec<(&str, bool)> = c
        .transcript(Mode::Tap)
        .iter()
        .map(|m| (m.text.as_str(), m.is_bot))
        .collect();
    assert_eq!(tap[1], ("Poor sleep", false));
    assert!(tap[2].1);

    assert_eq!(
        c.transcript(Mode::Type).last().unwrap().text,
        "mostly after dinner"
    );
    assert_eq!(sink.sent().len(), 3);

    match c.snapshot() {
        Event::StateSnapshot { mode, slider_phase, .. } => {
            assert_eq!(mode, Mode::Type);
            assert_eq!(slider_phase, SliderPhase::ShowingTranscript);
        }
        other => panic!("unexpected {other:?}"),
    }
}

proptest! {
    #[test]
    fn blank_text_never_appends(text in "[ \t\n\r]{0,12}") {
        let mut c = ConversationController::default();
        let before = c.transcript(Mode::Type).len();
        prop_assert!(c.submit_text(&text).is_none());
        prop_assert_eq!(c.transcript(Mode::Type).len(), before);
    }

    #[test]
    fn non_blank_text_appends_trimmed_user_message(
        core in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]|[a-zA-Z0-9]",
        pad in "[ \t]{0,4}",
    ) {
        let mut c = ConversationController::default();
        c.set_draft("draft");
        let before = c.transcript(Mode::Type).len();
        let text = format!("{pad}{core}{pad}");

        prop_assert!(c.submit_text(&text).is_some());
        let transcript = c.transcript(Mode::Type);
        prop_assert_eq!(transcript.len(), before + 1);
        let last = transcript.last().unwrap();
        prop_assert_eq!(&last.text, &core);
        prop_assert!(!last.is_bot);
        prop_assert_eq!(c.draft(), "");
    }

    #[test]
    fn toggle_choice_twice_is_identity(
        first in prop::sample::select(vec!["carbs", "ate_out", "stress", "period"]),
        second in prop::sample::select(vec!["carbs", "ate_out", "stress", "period"]),
    ) {
        let mut c = ConversationController::default();
        c.set_mode(Mode::Tap);
        c.toggle_choice(first);
        let before = c.selection().clone();
        c.toggle_choice(second);
        c.toggle_choice(second);
        prop_assert_eq!(c.selection(), &before);
    }
}
