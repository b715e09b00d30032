//! Platform abstraction layer
//!
//! This module provides a unified interface for platform-specific operations,
//! abstracting away differences between Unix and Windows: locating the
//! packager on the search path, picking config directories, the path-list
//! separator PyInstaller expects in `--add-data`, and how child processes
//! are spawned.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use traits::*;

use std::process::Command;

/// Separator between source and destination in `--add-data SRC<SEP>DEST`.
///
/// PyInstaller requires the platform's native path-list separator here.
#[cfg(windows)]
pub const DATA_SEPARATOR: char = ';';

/// Separator between source and destination in `--add-data SRC<SEP>DEST`.
///
/// PyInstaller requires the platform's native path-list separator here.
#[cfg(not(windows))]
pub const DATA_SEPARATOR: char = ':';

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific filesystem operations
    pub fn filesystem() -> Box<dyn FilesystemOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixFilesystem::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsFilesystem::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPaths::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPaths::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Apply platform-specific spawn options to a packager command
    pub fn configure_child(command: &mut Command) {
        #[cfg(unix)]
        {
            unix::configure_child(command);
        }

        #[cfg(windows)]
        {
            windows::configure_child(command);
        }
    }
}

/// Check if a command resolves to an executable, on the search path or as
/// an explicit path
pub fn is_command_available(command: &str) -> bool {
    match Platform::filesystem().find_command(command) {
        Ok(found) => found.is_some(),
        Err(e) => {
            warn!("Failed to search for '{}': {}", command, e);
            false
        }
    }
}
