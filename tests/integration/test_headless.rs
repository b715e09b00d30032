//! Integration Tests for Headless Builds
//!
//! Runs the `py2win` binary with `--profile FILE --build` against a stand-in
//! packager and checks exit codes and what lands on stdout.

#![cfg(unix)]

#[path = "../test_utils/mod.rs"]
mod test_utils;

use py2win::models::BuildConfig;
use py2win::save_profile;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use test_utils::TestProject;

/// Write a config pointing the packager at `program`
fn write_config(project: &TestProject, program: &str) -> PathBuf {
    project.add_file(
        "py2win.toml",
        &format!("[packager]\nprogram = {:?}\n", program),
    )
}

fn write_profile(project: &TestProject) -> PathBuf {
    let path = project.path().join("release.json");
    save_profile(&BuildConfig::new(project.script()), &path).unwrap();
    path
}

fn run_headless(config: &Path, profile: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_py2win"))
        .arg("-c")
        .arg(config)
        .arg("-p")
        .arg(profile)
        .arg("-b")
        .env("RUST_LOG", "info")
        .env_remove("PY2WIN_CONFIG")
        .env_remove("PY2WIN_DEBUG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_exit_code_is_packagers() {
    let project = TestProject::new();
    let program = project.fake_packager("echo \"$@\"; exit 3");
    let config = write_config(&project, &program);
    let profile = write_profile(&project);

    let output = run_headless(&config, &profile);
    assert_eq!(output.status.code(), Some(3));

    let script = project.script().display().to_string();
    assert_eq!(
        stdout_lines(&output),
        vec![
            format!("Running command: {} --clean --onefile {}", program, script),
            format!("--clean --onefile {}", script),
        ]
    );
}

#[test]
fn test_log_records_stay_off_stdout() {
    let project = TestProject::new();
    let program = project.fake_packager("echo packaging");
    let config = write_config(&project, &program);
    let profile = write_profile(&project);

    let output = run_headless(&config, &profile);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_lines(&output);
    assert_eq!(stdout.len(), 3);
    assert_eq!(stdout[1], "packaging");
    assert_eq!(stdout[2], "--- Build successful! ---");
    assert!(stdout.iter().all(|line| !line.contains("INFO")));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Starting Py2Win"));
    assert!(!stderr.contains('\u{1b}'));
}

#[test]
fn test_malformed_profile_is_usage_error() {
    let project = TestProject::new();
    let program = project.fake_packager("exit 0");
    let config = write_config(&project, &program);
    let profile = project.add_file("broken.json", "{\"script_path\": ");

    let output = run_headless(&config, &profile);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_packager_is_launch_failure() {
    let project = TestProject::new();
    let config = write_config(&project, "/nonexistent/py2win/pyinstaller");
    let profile = write_profile(&project);

    let output = run_headless(&config, &profile);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("tool_not_found"));
}

#[test]
fn test_build_without_profile_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_py2win"))
        .arg("--build")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
