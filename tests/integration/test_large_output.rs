//! Integration Tests for Large Output Handling
//!
//! Builds print a lot; every line must arrive, once, in order.

#![cfg(unix)]

use py2win::command::PackagerCommand;
use py2win::runner::BuildRunner;

fn sh(script: &str) -> PackagerCommand {
    PackagerCommand::new("sh", ["-c", script])
}

#[tokio::test]
async fn test_five_hundred_lines_in_order() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("i=1; while [ $i -le 500 ]; do echo \"line $i\"; i=$((i+1)); done"))
        .unwrap()
        .collect()
        .await;

    assert!(result.is_success());
    assert_eq!(result.lines.len(), 500);
    for (index, line) in result.lines.iter().enumerate() {
        assert_eq!(line.text, format!("line {}", index + 1));
        assert_eq!(line.line_number, index + 1);
    }
}

#[tokio::test]
async fn test_large_output_not_dropped() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("i=0; while [ $i -lt 20000 ]; do echo \"$i\"; i=$((i+1)); done"))
        .unwrap()
        .collect()
        .await;

    assert_eq!(result.lines.len(), 20000);
    assert_eq!(result.lines.last().map(|l| l.text.as_str()), Some("19999"));
}

#[test]
fn test_slow_consumer_sees_everything() {
    let runner = BuildRunner::default();
    let mut stream = runner
        .start(sh("i=0; while [ $i -lt 2000 ]; do echo \"$i\"; i=$((i+1)); done"))
        .unwrap();

    // Let the packager finish before draining anything
    while runner.is_busy() {
        std::thread::sleep(std::time::Duration::from_millis(20));
    }

    let mut events = Vec::new();
    while !stream.is_finished() {
        events.extend(stream.drain_pending());
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    let lines: Vec<_> = events
        .iter()
        .filter_map(|event| event.as_line().map(|l| l.text.clone()))
        .collect();
    assert_eq!(lines.len(), 2000);
    assert_eq!(lines.first().map(String::as_str), Some("0"));
    assert_eq!(lines.last().map(String::as_str), Some("1999"));
}

#[tokio::test]
async fn test_very_long_single_line() {
    let runner = BuildRunner::default();
    let long = "x".repeat(100_000);
    let result = runner
        .start(sh(&format!("printf '%s\\n' {}", long)))
        .unwrap()
        .collect()
        .await;

    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines[0].text.len(), 100_000);
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("printf 'ok \\377\\376 end\\n'"))
        .unwrap()
        .collect()
        .await;

    assert!(result.is_success());
    assert_eq!(result.lines.len(), 1);
    assert!(result.lines[0].text.starts_with("ok "));
    assert!(result.lines[0].text.contains('\u{FFFD}'));
    assert!(result.lines[0].text.ends_with(" end"));
}
