//! Platform-specific operation traits
//!
//! These traits define the interface for platform-specific operations,
//! allowing for clean abstraction and easier testing.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Name of the per-user directories Py2Win creates
pub const APP_DIR_NAME: &str = "py2win";

/// Platform-specific filesystem operations
pub trait FilesystemOps: Send + Sync {
    /// Check if a file is executable
    fn is_executable(&self, path: &Path) -> bool;

    /// Find a command on the executable search path.
    ///
    /// A command containing a path separator is checked as-is instead.
    fn find_command(&self, command: &str) -> Result<Option<PathBuf>>;
}

/// Where Py2Win keeps its per-user files
pub trait PathOps: Send + Sync {
    /// Directory holding `config.toml`
    fn config_dir(&self) -> Result<PathBuf>;

    /// Default directory offered by the profile dialogs
    fn profiles_dir(&self) -> Result<PathBuf>;
}
