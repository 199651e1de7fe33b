//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a temporary home directory.

mod common;

use common::{assert_contains, json_lines, run_cli, run_cli_success, run_cli_with_stdin};
use tempfile::TempDir;

fn event_types(events: &[serde_json::Value]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| e["type"].as_str())
        .collect()
}

#[test]
fn test_labels_table() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["labels"]);
    assert_contains(&out, "Strong");
    assert_contains(&out, "#E98BAC");
}

#[test]
fn test_labels_json() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["labels", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0]["label"], "None");
    assert_eq!(rows[8]["tint"], "intense");
}

#[test]
fn test_config_get_default() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["config", "get", "timing.confirm_dwell_ms"]);
    assert_eq!(out.trim(), "1000");
}

#[test]
fn test_config_set_persists() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["config", "set", "rewards.current_streak_days", "20"]);
    let out = run_cli_success(home.path(), &["config", "get", "rewards.current_streak_days"]);
    assert_eq!(out.trim(), "20");
    assert!(home.path().join(".config/auvra/config.toml").exists());
}

#[test]
fn test_config_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
    assert_contains(&stderr, "error:");
}

#[test]
fn test_rewards_list_json_groups_tiers() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["rewards", "list", "--json", "--claimed", "2"]);
    let groups: serde_json::Value = serde_json::from_str(&out).unwrap();
    let groups = groups.as_array().unwrap();
    assert_eq!(groups[0]["tier"], "Seed");
    let claimed = groups[0]["rewards"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "2")
        .unwrap();
    assert_eq!(claimed["state"], "claimed");
}

#[test]
fn test_rewards_classify_with_streak() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(
        home.path(),
        &["rewards", "classify", "3", "--streak", "12", "--json"],
    );
    let view: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(view["state"], "available");
    assert_eq!(view["progress"], 1.0);
    assert!(view["gradient_stops"].as_array().unwrap().len() >= 2);
}

#[test]
fn test_rewards_classify_unknown_fails() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["rewards", "classify", "missing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_rewards_milestones() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["rewards", "milestones", "--streak", "30"]);
    assert_contains(&out, "* Grow");
    assert_contains(&out, "30 days to the next milestone");
}

#[test]
fn test_chat_slider_flow_json() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_stdin(
        home.path(),
        &["chat", "--json", "--manual-clock"],
        "/slider 7\n/wait 1000\n/quit\n",
    );
    assert_eq!(code, 0, "{stderr}");

    let events = json_lines(&stdout);
    let types = event_types(&events);
    assert_eq!(types.first(), Some(&"slider_selected"));
    assert!(types.contains(&"transcript_revealed"));
    assert_eq!(types.last(), Some(&"tasks_cancelled"));

    let revealed = events
        .iter()
        .find(|e| e["type"] == "transcript_revealed")
        .unwrap();
    assert_eq!(revealed["messages"][0]["text"], "7 = Strong bloating");
}

#[test]
fn test_chat_recording_flow_json() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_stdin(
        home.path(),
        &["chat", "--json", "--manual-clock"],
        "/mode yap\n/record\n/wait 3000\n/stop\n/send\n",
    );
    assert_eq!(code, 0);

    let events = json_lines(&stdout);
    let ticks = events
        .iter()
        .filter(|e| e["type"] == "recording_ticked")
        .count();
    assert_eq!(ticks, 3);
    let sent = events
        .iter()
        .find(|e| e["type"] == "recording_sent")
        .unwrap();
    assert_eq!(sent["message"]["text"], "Voice message");
    assert_eq!(sent["elapsed_seconds"], 3);
}

#[test]
fn test_chat_typed_text_human_output() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_stdin(
        home.path(),
        &["chat", "--manual-clock"],
        "/mode type\n  felt fine  \n",
    );
    assert_eq!(code, 0);
    assert_contains(&stdout, "How was your bloating this week?");
    assert_contains(&stdout, "you: felt fine");
}

#[test]
fn test_chat_bad_slider_value_keeps_session() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_stdin(
        home.path(),
        &["chat", "--json", "--manual-clock"],
        "/slider 12\n/slider 7\n/quit\n",
    );
    assert_eq!(code, 0, "{stderr}");
    assert_contains(&stderr, "error:");

    let types = event_types(&json_lines(&stdout))
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    assert_eq!(types, vec!["slider_selected", "tasks_cancelled"]);
}

#[test]
fn test_chat_unknown_choice_keeps_session() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_stdin(
        home.path(),
        &["chat", "--json", "--manual-clock"],
        "/mode tap\n/toggle carb\n/toggle carbs\n/send\n/wait 1000\n",
    );
    assert_eq!(code, 0, "{stderr}");
    assert_contains(&stderr, "Unknown choice option: carb");

    let events = json_lines(&stdout);
    let appended: Vec<&str> = events
        .iter()
        .filter(|e| e["type"] == "message_appended")
        .filter_map(|e| e["message"]["text"].as_str())
        .collect();
    assert_eq!(appended[0], "Ate more carbs");
    assert_eq!(appended.len(), 2);
}

#[test]
fn test_chat_help_lists_draft() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_stdin(home.path(), &["chat", "--manual-clock"], "/help\n");
    assert_eq!(code, 0);
    assert_contains(&stdout, "/draft <text>");
}
