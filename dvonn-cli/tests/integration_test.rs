//! Integration tests for the dvonn command-line tool
//!
//! Runs the built binary and checks what it prints.

use std::path::PathBuf;
use std::process::{Command, Output};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn dvonn(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dvonn"))
        .args(args)
        .output()
        .expect("failed to run dvonn")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Write `contents` to a file unique to this test
fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dvonn-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// Every field once, in row-major order
fn all_placements() -> String {
    let rows: [(u8, std::ops::RangeInclusive<u8>); 5] =
        [(1, 0..=8), (2, 0..=9), (3, 0..=10), (4, 1..=10), (5, 2..=10)];
    rows.iter()
        .flat_map(|(row, cols)| cols.clone().map(move |x| format!("{}{}", (b'A' + x) as char, row)))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// REPLAY
// ============================================================================

#[test]
fn test_replay_moves_to_state() {
    let out = dvonn(&["replay", "A1", "B1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), format!("ABB{}\n", "A".repeat(47)));
}

#[test]
fn test_replay_from_state() {
    let state = format!("ABB{}", "A".repeat(47));
    let out = dvonn(&["replay", "--state", &state, "c1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), format!("BBBB{}\n", "A".repeat(46)));
}

#[test]
fn test_replay_illegal_move_fails() {
    let out = dvonn(&["replay", "A1", "A1"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("occupied"));
}

#[test]
fn test_unknown_output_format_fails() {
    let out = dvonn(&["replay", "--output", "text", "A1"]);
    assert!(!out.status.success());
}

#[test]
fn test_replay_logfile_as_json() {
    let path = fixture("game.log", "# opening\nA1 B1\nC1\n");
    let out = dvonn(&["replay", "--logfile", path.to_str().unwrap(), "--output", "json"]);
    assert!(out.status.success());

    let records: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["move"], "C1");
    assert_eq!(records[2]["state"].as_str().unwrap().len(), 50);
}

#[test]
fn test_replay_transcript_with_truncate() {
    let path = fixture("game.txt", "White [alice] Black [bob] 1. a1 b1 2. c1 d1");
    let out = dvonn(&[
        "replay",
        "--transcript",
        path.to_str().unwrap(),
        "--truncate",
        "3",
        "--output",
        "transcript",
    ]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "White [alice] Black [bob] 1. a1 b1 2. c1\n");
}

#[test]
fn test_truncate_conflicts_with_state() {
    let state = format!("ABB{}", "A".repeat(47));
    let out = dvonn(&["replay", "--state", &state, "--truncate", "1"]);
    assert!(!out.status.success());
}

#[test]
fn test_resume_before_last_placement() {
    let path = fixture("placements.log", &all_placements());
    let log = path.to_str().unwrap();

    let cut = dvonn(&["replay", "--logfile", log, "--truncate", "48"]);
    assert!(cut.status.success());
    let state = stdout(&cut).trim().to_string();
    assert!(state.starts_with('A'));

    // K5 is filled in before the stacking move is applied
    let resumed = dvonn(&["replay", "--state", &state, "--output", "logfile", "E1F1"]);
    assert!(resumed.status.success(), "{}", String::from_utf8_lossy(&resumed.stderr));
    assert_eq!(stdout(&resumed), "K5 E1F1\n");

    let full = dvonn(&["replay", "--logfile", log, "--output", "state", "E1F1"]);
    let resumed = dvonn(&["replay", "--state", &state, "E1F1"]);
    assert_eq!(stdout(&resumed), stdout(&full));
}

#[test]
fn test_missing_file_fails() {
    let out = dvonn(&["replay", "--logfile", "/nonexistent/dvonn.log"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to read"));
}

// ============================================================================
// PLAYOUT
// ============================================================================

#[test]
fn test_playout_is_reproducible() {
    let a = dvonn(&["playout", "--seed", "17"]);
    let b = dvonn(&["playout", "--seed", "17"]);
    assert!(a.status.success());
    assert_eq!(stdout(&a), stdout(&b));
}

#[test]
fn test_playout_replays_to_same_state() {
    let log = dvonn(&["playout", "--seed", "5"]);
    let state = dvonn(&["playout", "--seed", "5", "--output", "state"]);
    let path = fixture("playout.log", &stdout(&log));

    let replayed = dvonn(&["replay", "--logfile", path.to_str().unwrap()]);
    assert!(replayed.status.success());
    assert_eq!(stdout(&replayed), stdout(&state));
}
