//! Windows path operations

use crate::error::{Error, Result};
use crate::platform::traits::{PathOps, APP_DIR_NAME};
use std::path::PathBuf;

/// Folder under Documents where profiles are offered by default
const PROFILES_FOLDER: &str = "Py2Win Profiles";

pub struct WindowsPaths;

impl WindowsPaths {
    pub fn new() -> Self {
        Self
    }
}

fn not_found(what: &str) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("Could not determine {} directory", what),
    ))
}

impl PathOps for WindowsPaths {
    fn config_dir(&self) -> Result<PathBuf> {
        // AppData\Roaming\py2win
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| not_found("config"))
    }

    fn profiles_dir(&self) -> Result<PathBuf> {
        // Profiles are user documents; fall back to AppData\Local
        dirs::document_dir()
            .map(|dir| dir.join(PROFILES_FOLDER))
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("profiles")))
            .ok_or_else(|| not_found("profiles"))
    }
}
