//! Build Profiles
//!
//! A profile is a flat JSON document holding the form values of a build so
//! they can be reused later:
//!
//! ```json
//! {
//!     "script_path": "app.py",
//!     "is_windowed": false,
//!     "is_onefile": true,
//!     "icon_path": "",
//!     "data_paths": ["assets", "config.json"]
//! }
//! ```
//!
//! Loading is lenient: missing keys and keys of the wrong type fall back to
//! their defaults, checkbox states may be stored as booleans or as `0`/`1`,
//! and non-string entries of `data_paths` are skipped. Only a document that
//! cannot be read or is not a JSON object is rejected, as `invalid_profile`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{BuildConfig, Resource, ResourceList};

/// Suggested file extension for profiles
pub const PROFILE_EXTENSION: &str = "json";

/// Indentation of written profiles
const PROFILE_INDENT: &[u8] = b"    ";

/// Field values of a build, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub script_path: String,
    pub is_windowed: bool,
    pub is_onefile: bool,
    pub icon_path: String,
    pub data_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_path: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            script_path: String::new(),
            is_windowed: false,
            is_onefile: true,
            icon_path: String::new(),
            data_paths: Vec::new(),
            app_name: None,
            dist_path: None,
        }
    }
}

impl Profile {
    /// Capture the values of `config`
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            script_path: path_string(&config.script_path),
            is_windowed: config.windowed,
            is_onefile: config.onefile,
            icon_path: config
                .icon_path
                .as_deref()
                .map(path_string)
                .unwrap_or_default(),
            data_paths: config.resources.iter().map(|r| path_string(&r.source)).collect(),
            app_name: config.app_name.clone(),
            dist_path: config.dist_dir.as_deref().map(path_string),
        }
    }

    /// Rebuild a configuration; resource kinds are re-detected from disk
    pub fn to_config(&self) -> BuildConfig {
        let resources: ResourceList = self.data_paths.iter().map(Resource::detect).collect();

        let mut config = BuildConfig::new(&self.script_path)
            .with_windowed(self.is_windowed)
            .with_onefile(self.is_onefile)
            .with_icon(&self.icon_path)
            .with_resources(resources);
        if let Some(name) = &self.app_name {
            config = config.with_app_name(name.as_str());
        }
        if let Some(dist) = &self.dist_path {
            config = config.with_dist_dir(dist);
        }
        config
    }

    /// Read values from a parsed document
    pub fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "profile is not a JSON object".to_string())?;
        let defaults = Self::default();

        Ok(Self {
            script_path: string_field(object, "script_path").unwrap_or(defaults.script_path),
            is_windowed: flag_field(object, "is_windowed").unwrap_or(defaults.is_windowed),
            is_onefile: flag_field(object, "is_onefile").unwrap_or(defaults.is_onefile),
            icon_path: string_field(object, "icon_path").unwrap_or(defaults.icon_path),
            data_paths: object
                .get("data_paths")
                .and_then(Value::as_array)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|entry| {
                            let path = entry.as_str();
                            if path.is_none() {
                                debug!("Skipping non-string data path {}", entry);
                            }
                            path.map(str::to_string)
                        })
                        .collect()
                })
                .unwrap_or(defaults.data_paths),
            app_name: string_field(object, "app_name").filter(|s| !s.trim().is_empty()),
            dist_path: string_field(object, "dist_path").filter(|s| !s.is_empty()),
        })
    }

    /// Parse a profile document
    pub fn from_json_str(json: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::from_value(&value)
    }

    /// Render as pretty JSON with a four-space indent
    pub fn to_json_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(PROFILE_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| Error::Internal {
            reason: format!("Profile JSON is not UTF-8: {}", e),
        })
    }

    /// Load a profile from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidProfile {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let profile = Self::from_json_str(&content).map_err(invalid)?;
        info!("Loaded profile from {}", path.display());
        Ok(profile)
    }

    /// Write the profile to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let save_error = |reason: String| Error::ProfileSaveFailed {
            path: path.to_path_buf(),
            reason,
        };

        let json = self.to_json_string().map_err(|e| save_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| save_error(e.to_string()))?;
        info!("Saved profile to {}", path.display());
        Ok(())
    }
}

/// Load the build configuration stored at `path`
pub fn load_profile(path: &Path) -> Result<BuildConfig> {
    Profile::load(path).map(|profile| profile.to_config())
}

/// Store the values of `config` at `path`
pub fn save_profile(config: &BuildConfig, path: &Path) -> Result<()> {
    Profile::from_config(config).save(path)
}

/// `path` with the profile extension added when it has none
pub fn with_profile_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(PROFILE_EXTENSION)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Booleans, or numbers where anything non-zero is true
fn flag_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    match object.get(key)? {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        other => {
            debug!("Ignoring {} with unexpected value {}", key, other);
            None
        }
    }
}
