//! Unit Tests for the Build Form and Window State
//!
//! Drives `AppState` the way the window does, without a display.

use py2win::models::{BuildConfig, BuildOutcome, BuildStatus, LogLevel, OutputLine, Resource};
use py2win::runner::BuildEvent;
use py2win::state::{
    AppState, BuildForm, LogSource, BUILD_LABEL, STATUS_BUILDING, STATUS_FAILED, STATUS_READY,
    STATUS_SUCCEEDED,
};
use py2win::Error;
use std::path::PathBuf;

fn form_with(names: &[&str]) -> BuildForm {
    let mut form = BuildForm::default();
    form.add_files(names.iter().map(PathBuf::from));
    form
}

#[test]
fn test_remove_selected_reports_count() {
    let mut state = AppState::default();
    state.form = form_with(&["a", "b", "c", "d", "e"]);
    state.form.select(1, false);
    state.form.select(3, true);

    state.remove_selected_resources();

    assert_eq!(state.status, "Removed 2 item(s).");
    assert_eq!(
        state.form.resources.paths(),
        ["a", "c", "e"].map(PathBuf::from).to_vec()
    );
    assert!(state.form.selection().is_empty());
}

#[test]
fn test_remove_with_nothing_selected_keeps_status() {
    let mut state = AppState::default();
    state.form = form_with(&["a"]);
    state.remove_selected_resources();

    assert_eq!(state.status, STATUS_READY);
    assert_eq!(state.form.resources.len(), 1);
}

#[test]
fn test_snapshot_trims_and_carries_resources() {
    let mut form = form_with(&["data.bin"]);
    form.add_folder(PathBuf::from("assets"));
    form.script_path = "  main.py ".to_string();
    form.icon_path = "   ".to_string();
    form.windowed = true;
    form.app_name = " Tool ".to_string();

    let config = form.snapshot();
    assert_eq!(config.script_path, PathBuf::from("main.py"));
    assert!(config.icon_path.is_none());
    assert!(config.windowed);
    assert_eq!(config.app_name.as_deref(), Some("Tool"));
    assert_eq!(config.resources.len(), 2);
    assert!(config.resources.get(1).is_some_and(Resource::is_directory));
}

#[test]
fn test_apply_config_replaces_everything() {
    let mut form = form_with(&["old"]);
    form.select(0, false);

    let config = BuildConfig::new("new.py")
        .with_onefile(false)
        .with_icon("new.ico")
        .with_resource(Resource::file("fresh.txt"))
        .with_dist_dir("out");
    form.apply_config(&config);

    assert_eq!(form.script_path, "new.py");
    assert_eq!(form.icon_path, "new.ico");
    assert!(!form.onefile);
    assert_eq!(form.dist_dir, "out");
    assert!(form.selection().is_empty());
    assert_eq!(form.snapshot(), config);
}

#[test]
fn test_form_persists_without_selection() {
    let mut form = form_with(&["a", "b"]);
    form.select(1, false);

    let json = serde_json::to_string(&form).unwrap();
    let restored: BuildForm = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.resources, form.resources);
    assert!(restored.selection().is_empty());
}

#[test]
fn test_successful_build_flow() {
    let dir = tempfile::TempDir::new().unwrap();
    let script = dir.path().join("app.py");
    std::fs::write(&script, "print(1)").unwrap();

    let mut state = AppState::default();
    state.notice("old entry");
    state.form.script_path = script.display().to_string();

    let config = state.prepare_build().unwrap();
    assert_eq!(config.script_path, script);
    assert!(state.log.is_empty());
    assert_eq!(state.status, STATUS_BUILDING);
    assert!(!state.can_build());

    state.apply_event(BuildEvent::Started {
        command_line: "pyinstaller --clean --onefile app.py".into(),
    });
    state.apply_event(BuildEvent::Warning("Skipping missing resource: gone.txt".into()));
    state.apply_event(BuildEvent::Line(OutputLine::new("", 1)));
    state.apply_event(BuildEvent::Line(OutputLine::new("42 WARNING: lib not found", 2)));
    state.apply_event(BuildEvent::Done(BuildOutcome::Succeeded));

    let sources: Vec<_> = state.log.iter().map(|e| e.source).collect();
    assert_eq!(
        sources,
        vec![
            LogSource::Command,
            LogSource::Output(LogLevel::Warning),
            LogSource::Output(LogLevel::Plain),
            LogSource::Output(LogLevel::Warning),
            LogSource::Success,
        ]
    );
    assert_eq!(
        state.log.get(4).map(|e| e.text.as_str()),
        Some("--- Build successful! ---")
    );
    assert_eq!(state.status, STATUS_SUCCEEDED);
    assert_eq!(state.build_status, BuildStatus::Succeeded);
    assert_eq!(state.build_button_label(), BUILD_LABEL);
}

#[test]
fn test_tool_not_found_banner() {
    let mut state = AppState::default();
    state.build_status = BuildStatus::Running;
    state.apply_event(BuildEvent::Done(BuildOutcome::tool_not_found("pyinstaller")));

    let texts: Vec<_> = state.log.iter().map(|e| e.text.clone()).collect();
    assert_eq!(
        texts,
        vec![
            "--- ERROR: pyinstaller command not found. ---",
            "Please install it using: pip install pyinstaller",
        ]
    );
    assert_eq!(state.status, STATUS_FAILED);
    assert!(state.can_build());
}

#[test]
fn test_internal_error_banner() {
    let mut state = AppState::default();
    state.apply_event(BuildEvent::Done(BuildOutcome::internal("pipe closed")));

    assert_eq!(
        state.log.iter().last().map(|e| e.text.as_str()),
        Some("--- An unexpected error occurred: pipe closed ---")
    );
    assert_eq!(state.build_status, BuildStatus::Failed);
}

#[test]
fn test_rejected_build_leaves_form_usable() {
    let mut state = AppState::default();
    state.build_status = BuildStatus::Running;
    state.build_rejected(&Error::BuildInProgress);

    assert_eq!(state.status, "A build is already running.");
    assert_eq!(state.build_status, BuildStatus::Failed);
    assert!(state.can_build());
}

#[test]
fn test_copy_text_joins_lines() {
    let mut state = AppState::new(10);
    state.notice("first");
    state.apply_event(BuildEvent::Line(OutputLine::new("second", 1)));
    assert_eq!(state.log.to_text(), "first\nsecond");
}
