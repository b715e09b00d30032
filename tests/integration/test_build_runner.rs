//! Integration Tests for the Build Runner
//!
//! Run real processes through the runner and check what a consumer sees.

#![cfg(unix)]

#[path = "../test_utils/mod.rs"]
mod test_utils;

use py2win::command::{CommandBuilder, PackagerCommand};
use py2win::models::{BuildConfig, BuildOutcome, BuildStatus, Resource};
use py2win::runner::{BuildEvent, BuildRunner};
use py2win::Error;
use test_utils::{collect_texts, TestProject};

fn sh(script: &str) -> PackagerCommand {
    PackagerCommand::new("sh", ["-c", script])
}

#[tokio::test]
async fn test_successful_build() {
    let runner = BuildRunner::default();
    let result = runner.start(sh("echo building; echo done")).unwrap().collect().await;

    assert_eq!(result.status, BuildStatus::Succeeded);
    assert_eq!(result.outcome, Some(BuildOutcome::Succeeded));
    assert_eq!(collect_texts(&result), vec!["building", "done"]);
    assert!(result.duration.is_some());
}

#[tokio::test]
async fn test_nonzero_exit_keeps_output() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("echo 'ERROR: script not found'; exit 1"))
        .unwrap()
        .collect()
        .await;

    assert_eq!(result.status, BuildStatus::Failed);
    assert_eq!(result.exit_code(), Some(1));
    assert_eq!(collect_texts(&result), vec!["ERROR: script not found"]);
}

#[tokio::test]
async fn test_started_first_done_last() {
    let runner = BuildRunner::default();
    let mut stream = runner.start(sh("echo a; echo b")).unwrap();

    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(BuildEvent::Started { .. })));
    assert!(matches!(events.last(), Some(BuildEvent::Done(_))));
    assert_eq!(events.iter().filter(|e| e.is_done()).count(), 1);
    assert_eq!(stream.status(), BuildStatus::Succeeded);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_stderr_interleaved_with_stdout() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("echo one; echo two >&2; echo three; echo four >&2"))
        .unwrap()
        .collect()
        .await;

    assert_eq!(collect_texts(&result), vec!["one", "two", "three", "four"]);
}

#[tokio::test]
async fn test_empty_lines_are_not_terminal() {
    let runner = BuildRunner::default();
    let result = runner
        .start(sh("echo first; echo; echo; echo last"))
        .unwrap()
        .collect()
        .await;

    assert_eq!(collect_texts(&result), vec!["first", "", "", "last"]);
    assert!(result.is_success());
}

#[tokio::test]
async fn test_line_numbers_are_sequential() {
    let runner = BuildRunner::default();
    let result = runner.start(sh("printf 'a\\nb\\nc\\n'")).unwrap().collect().await;

    let numbers: Vec<_> = result.lines.iter().map(|l| l.line_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_crlf_stripped() {
    let runner = BuildRunner::default();
    let result = runner.start(sh("printf 'win\\r\\nline\\r\\n'")).unwrap().collect().await;
    assert_eq!(collect_texts(&result), vec!["win", "line"]);
}

#[tokio::test]
async fn test_one_build_at_a_time() {
    let runner = BuildRunner::default();
    let first = runner.start(sh("sleep 1; echo first")).unwrap();

    let err = runner.start(sh("echo second")).unwrap_err();
    assert!(matches!(err, Error::BuildInProgress));
    assert_eq!(err.category(), "build_in_progress");

    let result = first.collect().await;
    assert_eq!(collect_texts(&result), vec!["first"]);

    let second = runner.start(sh("echo second")).unwrap().collect().await;
    assert_eq!(collect_texts(&second), vec!["second"]);
}

#[tokio::test]
async fn test_clones_share_the_busy_flag() {
    let runner = BuildRunner::default();
    let clone = runner.clone();
    let stream = runner.start(sh("sleep 1")).unwrap();

    assert!(clone.is_busy());
    assert!(clone.start(sh("true")).is_err());
    stream.collect().await;
    assert!(!clone.is_busy());
}

#[tokio::test]
async fn test_full_build_through_fake_packager() {
    let project = TestProject::new();
    let assets = project.add_dir("assets");
    let program = project.fake_packager("echo \"args: $*\"; echo '123 WARNING: test' >&2; exit 0");

    let runner = BuildRunner::new(CommandBuilder::new(program.clone()));
    let config = BuildConfig::new(project.script())
        .with_windowed(true)
        .with_resource(Resource::directory(&assets));

    let mut stream = runner.start_build(&config).unwrap();
    let expected_line = format!(
        "{} --clean --onefile --windowed --add-data={}{}assets {}",
        program,
        assets.display(),
        py2win::platform::DATA_SEPARATOR,
        project.script().display()
    );
    assert_eq!(stream.command_line(), expected_line);

    let mut lines = Vec::new();
    while let Some(event) = stream.next().await {
        if let BuildEvent::Line(line) = event {
            lines.push(line);
        }
    }

    assert_eq!(stream.status(), BuildStatus::Succeeded);
    assert!(lines[0].text.starts_with("args: --clean --onefile --windowed"));
    assert_eq!(lines[1].level, py2win::models::LogLevel::Warning);
}

#[test]
fn test_blocking_consumer() {
    let runner = BuildRunner::default();
    let mut stream = runner.start(sh("echo sync")).unwrap();

    let mut texts = Vec::new();
    while let Some(event) = stream.blocking_next() {
        texts.extend(event.as_line().map(|l| l.text.clone()));
    }
    assert_eq!(texts, vec!["sync"]);
    assert_eq!(stream.status(), BuildStatus::Succeeded);
}

#[test]
fn test_polling_consumer() {
    let runner = BuildRunner::default();
    let mut stream = runner.start(sh("echo polled; exit 4")).unwrap();

    let mut events = Vec::new();
    while !stream.is_finished() {
        events.extend(stream.drain_pending());
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    assert_eq!(stream.status(), BuildStatus::Failed);
    let outcome = events.iter().find_map(|e| e.outcome()).cloned();
    assert_eq!(outcome, Some(BuildOutcome::nonzero_exit(4)));
}
