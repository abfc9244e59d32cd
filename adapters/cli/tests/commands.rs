use std::process::{Command, Output};

use serde_json::Value;

fn neural_break(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_neural-break"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch neural-break")
}

fn stdout_of(args: &[&str]) -> String {
    let output = neural_break(args);
    assert!(
        output.status.success(),
        "neural-break {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn level_json_is_clamped_and_structured() {
    let text = stdout_of(&["level", "500", "--json"]);
    let config: Value = serde_json::from_str(&text).expect("level json");

    assert_eq!(config["level"]["Campaign"], 99);
    assert!(config["name"]
        .as_str()
        .is_some_and(|name| name.ends_with(" 99")));
}

#[test]
fn levels_json_lists_the_whole_campaign() {
    let text = stdout_of(&["levels", "--json"]);
    let table: Value = serde_json::from_str(&text).expect("levels json");
    let levels = table.as_array().expect("array of levels");

    assert_eq!(levels.len(), 99);
    assert_eq!(levels[4]["name"], "LEVEL 5 - WORM INVASION");
}

#[test]
fn rogue_and_test_configs_render_as_text() {
    let rogue = stdout_of(&["rogue", "2"]);
    assert!(rogue.starts_with("LAYER 2 - WORM NEST"));
    assert!(rogue.contains("chaos-worm"));

    let arena = stdout_of(&["test-config"]);
    assert!(arena.starts_with("TEST MODE"));
    assert!(arena.contains("boss"));
}

#[test]
fn simulate_reports_events_and_summary() {
    let text = stdout_of(&["simulate", "--seed", "11", "--max-ticks", "400"]);
    assert!(text.contains("started   level 1: BOOT SEQUENCE 1"));
    assert!(text.contains("400 ticks"));
}

#[test]
fn simulate_rejects_start_level_outside_arcade() {
    let output = neural_break(&["simulate", "--mode", "rogue", "--start-level", "4"]);
    assert!(!output.status.success());
}

#[test]
fn simulate_rejects_missing_config_file() {
    let output = neural_break(&["simulate", "--config", "/nonexistent/neural-break.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nonexistent"));
}
