//! Windows-specific platform implementations

mod filesystem;
mod paths;

pub use filesystem::WindowsFilesystem;
pub use paths::WindowsPaths;

use std::os::windows::process::CommandExt;
use std::process::Command;
use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

/// Keep the packager from flashing a console window over the GUI
pub fn configure_child(command: &mut Command) {
    command.creation_flags(CREATE_NO_WINDOW);
}
