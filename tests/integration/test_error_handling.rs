//! Integration Tests for Error Handling
//!
//! Every failure is reported as a terminal outcome or an error value; none
//! of them wedges the runner.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use py2win::command::{CommandBuilder, PackagerCommand};
use py2win::models::{BuildConfig, BuildStatus, FailureKind};
use py2win::runner::{BuildEvent, BuildRunner};
use py2win::Error;
use test_utils::TestProject;

#[tokio::test]
async fn test_missing_script_is_rejected() {
    let runner = BuildRunner::default();

    let err = runner.start_build(&BuildConfig::new("")).unwrap_err();
    assert!(matches!(err, Error::MissingScript { .. }));
    assert_eq!(err.user_message(), "Error: Please select a valid Python script.");

    let err = runner
        .start_build(&BuildConfig::new("/definitely/not/here.py"))
        .unwrap_err();
    assert_eq!(err.category(), "missing_script");
    assert!(!runner.is_busy());
}

#[tokio::test]
async fn test_missing_tool_is_reported_not_raised() {
    let project = TestProject::new();
    let runner = BuildRunner::new(CommandBuilder::new("py2win-no-such-packager"));
    assert!(!runner.tool_available());

    let mut stream = runner.start_build(&BuildConfig::new(project.script())).unwrap();
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }

    assert!(matches!(events[0], BuildEvent::Started { .. }));
    assert!(events.iter().all(|e| e.as_line().is_none()));
    let outcome = events.last().and_then(|e| e.outcome()).cloned();
    assert_eq!(
        outcome.and_then(|o| o.failure_kind()),
        Some(FailureKind::ToolNotFound)
    );
    assert_eq!(stream.status(), BuildStatus::Failed);
    assert!(!runner.is_busy());
}

#[tokio::test]
async fn test_retry_after_failure() {
    let runner = BuildRunner::new(CommandBuilder::new("py2win-no-such-packager"));
    let project = TestProject::new();
    let config = BuildConfig::new(project.script());

    for _ in 0..3 {
        let result = runner.start_build(&config).unwrap().collect().await;
        assert_eq!(result.status, BuildStatus::Failed);
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_killed_packager_reports_negative_code() {
    let runner = BuildRunner::default();
    let result = runner
        .start(PackagerCommand::new("sh", ["-c", "echo before; kill -9 $$"]))
        .unwrap()
        .collect()
        .await;

    assert_eq!(result.status, BuildStatus::Failed);
    assert_eq!(result.exit_code(), Some(-1));
    assert_eq!(result.lines.first().map(|l| l.text.as_str()), Some("before"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_executable_packager_is_not_launched() {
    let project = TestProject::new();
    let program = project.add_file("pyinstaller", "#!/bin/sh\nexit 0\n");

    let runner = BuildRunner::new(CommandBuilder::new(program.display().to_string()));
    let result = runner
        .start_build(&BuildConfig::new(project.script()))
        .unwrap()
        .collect()
        .await;

    assert_eq!(
        result.outcome.and_then(|o| o.failure_kind()),
        Some(FailureKind::ToolNotFound)
    );
}

#[cfg(unix)]
#[test]
fn test_dropped_stream_does_not_wedge_runner() {
    let runner = BuildRunner::default();
    let stream = runner
        .start(PackagerCommand::new(
            "sh",
            ["-c", "i=0; while [ $i -lt 5000 ]; do echo $i; i=$((i+1)); done"],
        ))
        .unwrap();
    drop(stream);

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(30);
    while runner.is_busy() && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    assert!(!runner.is_busy());
}
