//! Contract Tests for Build Profiles
//!
//! Saving then loading reproduces the build options; missing or mistyped
//! keys fall back to defaults; unreadable documents are `invalid_profile`.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use py2win::models::{BuildConfig, Resource, ResourceKind};
use py2win::profile::{load_profile, save_profile, Profile};
use py2win::Error;
use std::fs;
use test_utils::TestProject;

#[test]
fn test_save_then_load_reproduces_config() {
    let project = TestProject::new();
    let config = BuildConfig::new(project.script())
        .with_windowed(true)
        .with_onefile(false)
        .with_icon(project.icon())
        .with_resource(Resource::directory(project.add_dir("assets")))
        .with_resource(Resource::file(project.add_file("notes.txt", "n")));
    let path = project.path().join("release.json");

    save_profile(&config, &path).unwrap();
    let loaded = load_profile(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_optional_fields_round_trip() {
    let project = TestProject::new();
    let config = BuildConfig::new(project.script())
        .with_app_name("Viewer")
        .with_dist_dir(project.path().join("dist"));
    let path = project.path().join("named.json");

    save_profile(&config, &path).unwrap();
    assert_eq!(load_profile(&path).unwrap(), config);
}

#[test]
fn test_default_config_round_trips() {
    let project = TestProject::new();
    let path = project.path().join("empty.json");

    save_profile(&BuildConfig::default(), &path).unwrap();
    assert_eq!(load_profile(&path).unwrap(), BuildConfig::default());
}

#[test]
fn test_document_layout() {
    let project = TestProject::new();
    let data = project.add_file("data.csv", "1");
    let config = BuildConfig::new("app.py").with_resource(Resource::file(&data));
    let path = project.path().join("layout.json");
    save_profile(&config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let expected = format!(
        "{{\n    \"script_path\": \"app.py\",\n    \"is_windowed\": false,\n    \"is_onefile\": true,\n    \"icon_path\": \"\",\n    \"data_paths\": [\n        \"{}\"\n    ]\n}}",
        data.display()
    );
    assert_eq!(text, expected);
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
    let project = TestProject::new();
    let path = project.add_file("partial.json", r#"{"script_path": "main.py"}"#);

    let config = load_profile(&path).unwrap();
    assert_eq!(config, BuildConfig::new("main.py"));
    assert!(!config.windowed);
    assert!(config.onefile);
    assert!(config.icon_path.is_none());
    assert!(config.resources.is_empty());
}

#[test]
fn test_checkbox_integers_are_flags() {
    let project = TestProject::new();
    let path = project.add_file(
        "legacy.json",
        r#"{"script_path": "a.py", "is_windowed": 1, "is_onefile": 0, "icon_path": "", "data_paths": []}"#,
    );

    let config = load_profile(&path).unwrap();
    assert!(config.windowed);
    assert!(!config.onefile);
}

#[test]
fn test_resource_kinds_follow_disk() {
    let project = TestProject::new();
    let folder = project.add_dir("fonts");
    let profile = Profile {
        script_path: "a.py".to_string(),
        data_paths: vec![folder.display().to_string()],
        ..Profile::default()
    };
    let path = project.path().join("kinds.json");
    profile.save(&path).unwrap();

    let config = load_profile(&path).unwrap();
    assert_eq!(config.resources.get(0).map(|r| r.kind), Some(ResourceKind::Directory));
}

#[test]
fn test_duplicate_data_paths_collapse() {
    let project = TestProject::new();
    let path = project.add_file(
        "dupes.json",
        r#"{"script_path": "a.py", "data_paths": ["x.txt", "y.txt", "x.txt"]}"#,
    );

    let config = load_profile(&path).unwrap();
    assert_eq!(config.resources.len(), 2);
}

#[test]
fn test_malformed_document_is_invalid_profile() {
    let project = TestProject::new();
    for (name, body) in [
        ("truncated.json", "{\"script_path\": \"a.py\""),
        ("array.json", "[\"a.py\"]"),
        ("empty.json", ""),
    ] {
        let path = project.add_file(name, body);
        let err = load_profile(&path).unwrap_err();
        assert!(
            matches!(err, Error::InvalidProfile { .. }),
            "{} gave {:?}",
            name,
            err
        );
        assert_eq!(err.user_message(), "Error: Invalid or corrupt profile file.");
    }
}

#[test]
fn test_unreadable_file_is_invalid_profile() {
    let project = TestProject::new();
    let err = load_profile(&project.path().join("nowhere.json")).unwrap_err();
    assert_eq!(err.category(), "invalid_profile");
}

#[test]
fn test_save_into_missing_directory_fails() {
    let project = TestProject::new();
    let path = project.path().join("no").join("such").join("dir.json");

    let err = save_profile(&BuildConfig::new("a.py"), &path).unwrap_err();
    assert_eq!(err.category(), "profile_save_failed");
}
