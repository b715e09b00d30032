//! Test Fixtures
//!
//! A throwaway project directory with an entry script, optional icon and
//! resources, plus a stand-in packager script for runner tests.

use py2win::models::BuildResult;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project directory, removed on drop
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Project containing `app.py`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join("app.py"), "print('hello')\n").expect("write script");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn script(&self) -> PathBuf {
        self.path().join("app.py")
    }

    pub fn icon(&self) -> PathBuf {
        self.add_file("app.ico", "ico")
    }

    pub fn add_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn add_dir(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::create_dir_all(&path).expect("create dir");
        path
    }

    /// Executable shell script named `pyinstaller` running `body`
    #[cfg(unix)]
    pub fn fake_packager(&self, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.add_dir("bin");
        let path = bin.join("pyinstaller");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write packager");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod packager");
        path.display().to_string()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Texts of every captured line
pub fn collect_texts(result: &BuildResult) -> Vec<String> {
    result.lines.iter().map(|line| line.text.clone()).collect()
}
