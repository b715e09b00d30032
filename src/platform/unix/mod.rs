//! Unix-specific platform implementations

mod filesystem;
mod paths;

pub use filesystem::UnixFilesystem;
pub use paths::UnixPaths;

use std::process::Command;

/// Nothing to adjust on Unix; the child inherits no console
pub fn configure_child(_command: &mut Command) {}
