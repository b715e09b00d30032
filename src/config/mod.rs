//! Configuration management for Py2Win
//!
//! Application settings (which packager to run, log view limits, theme)
//! loaded from TOML through [`ConfigLoader`]. Every field has a default,
//! so a partial or absent file is always usable.

pub mod loader;

pub use loader::{ConfigFormat, ConfigLoader};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::command::DEFAULT_PACKAGER;
use crate::platform::Platform;

/// Main configuration structure for Py2Win
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Packager invocation
    pub packager: PackagerConfig,

    /// UI configuration
    pub ui: UiConfig,

    /// Profile storage
    pub profiles: ProfilesConfig,
}

/// Which packager to run and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagerConfig {
    /// Executable name or path
    pub program: String,

    /// Arguments inserted before the entry script
    pub extra_args: Vec<String>,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PACKAGER.to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How often build output is drained while a build runs
    pub poll_interval_ms: u64,

    /// Lines kept in the log view before the oldest are discarded
    pub max_log_lines: usize,

    /// Color scheme
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_log_lines: 50_000,
            theme: Theme::Dark,
        }
    }
}

impl UiConfig {
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Where profiles are suggested to live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Starting directory for profile dialogs
    pub directory: Option<PathBuf>,
}

impl ProfilesConfig {
    /// Configured directory, or the platform's profiles directory
    pub fn effective_directory(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }
        Platform::paths()
            .profiles_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
    }
}
