//! Windows filesystem operations

use crate::error::Result;
use crate::platform::traits::FilesystemOps;
use std::env;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, when resolving a bare command name
const EXECUTABLE_EXTENSIONS: [&str; 5] = ["", ".exe", ".bat", ".cmd", ".com"];

pub struct WindowsFilesystem;

impl WindowsFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl FilesystemOps for WindowsFilesystem {
    fn is_executable(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        // On Windows, check for common executable extensions
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            matches!(ext.to_lowercase().as_str(), "exe" | "bat" | "cmd" | "com")
        } else {
            false
        }
    }

    fn find_command(&self, command: &str) -> Result<Option<PathBuf>> {
        if command.is_empty() {
            return Ok(None);
        }

        let candidates = |base: PathBuf| {
            EXECUTABLE_EXTENSIONS
                .iter()
                .map(move |ext| PathBuf::from(format!("{}{}", base.display(), ext)))
        };

        if command.contains('\\') || command.contains('/') {
            return Ok(candidates(PathBuf::from(command)).find(|p| self.is_executable(p)));
        }

        let Some(path_env) = env::var_os("PATH") else {
            return Ok(None);
        };

        for path_dir in env::split_paths(&path_env) {
            if let Some(found) = candidates(path_dir.join(command)).find(|p| self.is_executable(p)) {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }
}
