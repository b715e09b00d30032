//! Build Configuration Model
//!
//! Immutable snapshot of the options chosen for one packager invocation.
//! A fresh `BuildConfig` is assembled from the UI state right before each
//! build and handed to the command builder and runner by value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::resource::{Resource, ResourceList};

/// Options for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Entry script handed to the packager
    pub script_path: PathBuf,

    /// Suppress the console window of the produced executable
    pub windowed: bool,

    /// Bundle into a single file instead of a directory tree
    pub onefile: bool,

    /// Icon resource; `None` when the field was left empty
    pub icon_path: Option<PathBuf>,

    /// Extra files and folders to bundle
    pub resources: ResourceList,

    /// Name of the produced executable (`--name`)
    pub app_name: Option<String>,

    /// Output directory (`--distpath`)
    pub dist_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::new(),
            windowed: false,
            onefile: true,
            icon_path: None,
            resources: ResourceList::new(),
            app_name: None,
            dist_dir: None,
        }
    }
}

impl BuildConfig {
    /// Create a configuration for `script_path` with default options
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            ..Self::default()
        }
    }

    pub fn with_windowed(mut self, windowed: bool) -> Self {
        self.windowed = windowed;
        self
    }

    pub fn with_onefile(mut self, onefile: bool) -> Self {
        self.onefile = onefile;
        self
    }

    /// Set the icon; an empty path clears it
    pub fn with_icon(mut self, icon_path: impl Into<PathBuf>) -> Self {
        let icon_path = icon_path.into();
        self.icon_path = if icon_path.as_os_str().is_empty() {
            None
        } else {
            Some(icon_path)
        };
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.add(resource);
        self
    }

    pub fn with_resources(mut self, resources: ResourceList) -> Self {
        self.resources = resources;
        self
    }

    /// Set the artifact name; blank names are ignored
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.app_name = if name.trim().is_empty() {
            None
        } else {
            Some(name.trim().to_string())
        };
        self
    }

    /// Set the output directory; an empty path clears it
    pub fn with_dist_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.dist_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    /// Whether the entry script is set and exists on disk
    pub fn has_valid_script(&self) -> bool {
        !self.script_path.as_os_str().is_empty() && self.script_path.exists()
    }

    /// Icon path if one is set and currently exists
    pub fn existing_icon(&self) -> Option<&Path> {
        self.icon_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty() && path.exists())
    }
}
