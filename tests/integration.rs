//! Integration tests for the automaton binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[String]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_automaton");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start automaton");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn commands(cmds: &[&str]) -> Vec<String> {
    cmds.iter().map(|c| c.to_string()).collect()
}

/// A 1x2 board: a red city at 0,0 next to free grass, then planning.
fn opening() -> Vec<String> {
    commands(&[
        r#"change {"type":"dimensions","rows":1,"cols":2}"#,
        r#"change {"type":"tile","cell":{"row":0,"col":0},"tile":{"tile":10,"owner":"red","stacks":1,"power":1}}"#,
        r#"change {"type":"tile","cell":{"row":0,"col":1},"tile":{"tile":0}}"#,
        r#"change {"type":"funds","player":"red","money":50}"#,
        r#"change {"type":"phase","phase":"resting"}"#,
        r#"change {"type":"phase","phase":"planning"}"#,
    ])
}

#[test]
fn handshake_lists_identity_and_options() {
    let lines = run_engine(&commands(&["ai", "quit"]));

    assert_eq!(lines[0], "id name Alice");
    assert_eq!(lines[1], "id descriptive Alice (medium HungryAI)");
    let options: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(options.len(), 6);
    for opt in &options {
        assert!(opt.contains(" type "), "option line missing type: {}", opt);
    }
    assert_eq!(lines.last().map(String::as_str), Some("aiok"));
}

#[test]
fn handshake_follows_options() {
    let lines = run_engine(&commands(&[
        "setoption name Character value b",
        "setoption name Variant value rampant",
        "setoption name Difficulty value easy",
        "ai",
        "quit",
    ]));
    assert_eq!(lines[0], "id name Bob");
    assert_eq!(lines[1], "id descriptive Bob (easy RampantAI)");
}

#[test]
fn isready_response() {
    let lines = run_engine(&commands(&["isready", "quit"]));
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&commands(&[
        "dance",
        "setoption name Threads value 4",
        "change {oops",
        "isready",
        "quit",
    ]));
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn go_before_planning_is_empty() {
    let lines = run_engine(&commands(&["newgame", "go", "quit"]));
    assert_eq!(lines, vec!["bestorders"]);
}

#[test]
fn planning_session_emits_orders() {
    let mut cmds = commands(&["setoption name Seed value 3", "newgame"]);
    cmds.extend(opening());
    cmds.extend(commands(&["go", "quit"]));
    let lines = run_engine(&cmds);
    assert_eq!(lines, vec!["bestorders T 0,0 expand 0,1 farm"]);
}

#[test]
fn orders_are_sent_once_per_planning_phase() {
    let mut cmds = commands(&["setoption name Seed value 3", "newgame"]);
    cmds.extend(opening());
    cmds.extend(commands(&["go", "go", "quit"]));
    let lines = run_engine(&cmds);
    assert_eq!(
        lines,
        vec!["bestorders T 0,0 expand 0,1 farm", "bestorders T 0,0 expand 0,1 farm"]
    );
}

#[test]
fn missing_ruleset_still_answers() {
    let mut cmds = commands(&["setoption name Ruleset value nowhere", "newgame"]);
    cmds.extend(opening());
    cmds.extend(commands(&["go", "isready", "quit"]));
    let lines = run_engine(&cmds);
    assert_eq!(lines, vec!["bestorders", "readyok"]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&commands(&["quit", "isready"]));
    assert!(lines.is_empty());
}
