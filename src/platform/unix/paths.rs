//! Unix path operations

use crate::error::{Error, Result};
use crate::platform::traits::{PathOps, APP_DIR_NAME};
use std::path::PathBuf;

pub struct UnixPaths;

impl UnixPaths {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an XDG base directory: the env override, then the `dirs`
    /// default, then `$HOME/<fallback>`.
    fn xdg_dir(var: &str, standard: Option<PathBuf>, fallback: &[&str]) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(var).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = standard {
            return Ok(dir);
        }
        dirs::home_dir()
            .map(|home| fallback.iter().fold(home, |acc, part| acc.join(part)))
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Could not determine directory for {}", var),
                ))
            })
    }
}

impl PathOps for UnixPaths {
    fn config_dir(&self) -> Result<PathBuf> {
        Self::xdg_dir("XDG_CONFIG_HOME", dirs::config_dir(), &[".config"])
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    fn profiles_dir(&self) -> Result<PathBuf> {
        Self::xdg_dir("XDG_DATA_HOME", dirs::data_dir(), &[".local", "share"])
            .map(|dir| dir.join(APP_DIR_NAME).join("profiles"))
    }
}
