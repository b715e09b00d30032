//! Configuration File Loading
//!
//! Finds, loads and saves the configuration file. Search order:
//!
//! 1. an explicit path (`--config`)
//! 2. `PY2WIN_CONFIG`
//! 3. `<platform config dir>/py2win/config.toml`
//! 4. `~/.py2win/config.toml`
//! 5. `./.py2win/config.toml`
//!
//! The first file that parses wins. Files that fail to parse are skipped
//! with a warning; if nothing is found the defaults are used.

use super::Config;
use crate::error::{Error, Result};
use crate::platform::Platform;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "PY2WIN_CONFIG";

/// Base name of configuration files inside search directories
const CONFIG_FILE_STEM: &str = "config";

/// Configuration file loader
pub struct ConfigLoader {
    /// Candidate files, in priority order
    search_paths: Vec<PathBuf>,
    /// Path of the file that was loaded, if any
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension; TOML unless it says `.json`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

impl ConfigLoader {
    /// Create a loader with the default search paths
    pub fn new() -> Self {
        Self::with_explicit_path(None)
    }

    /// Create a loader that tries `explicit` before the default search paths
    pub fn with_explicit_path(explicit: Option<PathBuf>) -> Self {
        let mut search_paths: Vec<PathBuf> = explicit.into_iter().collect();
        search_paths.extend(Self::get_search_paths());
        Self {
            search_paths,
            current_path: None,
        }
    }

    /// Load from the default search paths
    pub fn load() -> Result<Config> {
        Self::new().load_config()
    }

    /// Load from the first usable file, falling back to defaults
    pub fn load_config(&mut self) -> Result<Config> {
        if let Some((path, config)) = self.find_and_load_config() {
            self.validate_config(&config)?;
            info!("Loaded configuration from {}", path.display());
            self.current_path = Some(path);
            return Ok(config);
        }

        debug!("No configuration file found; using defaults");
        Ok(Config::default())
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path, format chosen by extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        let save_error = |reason: String| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| save_error(e.to_string()))?;
        }

        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(config).map_err(|e| save_error(e.to_string()))?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| save_error(e.to_string()))?
            }
        };

        fs::write(path, content).map_err(|e| save_error(e.to_string()))?;
        Ok(())
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            if !path.is_file() {
                continue;
            }
            match Self::load_config_file(path) {
                Ok(config) => return Some((path.clone(), config)),
                Err(e) => {
                    warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
        None
    }

    /// Load a specific configuration file
    pub fn load_config_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let format = ConfigFormat::from_path(path);
        let parse_error = |reason: String| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason,
        };

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Default candidate files after the explicit one
    fn get_search_paths() -> Vec<PathBuf> {
        let file_name = format!("{}.toml", CONFIG_FILE_STEM);
        let mut paths = Vec::new();

        if let Some(from_env) = env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            paths.push(PathBuf::from(from_env));
        }

        if let Ok(config_dir) = Platform::paths().config_dir() {
            paths.push(config_dir.join(&file_name));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".py2win").join(&file_name));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".py2win").join(&file_name));
        }

        paths
    }

    /// Get the default configuration path
    fn get_default_config_path() -> PathBuf {
        Platform::paths()
            .config_dir()
            .unwrap_or_else(|_| PathBuf::from(".").join(".py2win"))
            .join(format!("{}.toml", CONFIG_FILE_STEM))
    }

    /// Validate configuration
    pub fn validate_config(&self, config: &Config) -> Result<()> {
        if config.packager.program.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "packager.program".to_string(),
                reason: "Packager program cannot be empty".to_string(),
            });
        }

        if !(1..=10_000).contains(&config.ui.poll_interval_ms) {
            return Err(Error::ConfigValidationFailed {
                field: "ui.poll_interval_ms".to_string(),
                reason: "Poll interval must be between 1 and 10000 milliseconds".to_string(),
            });
        }

        if config.ui.max_log_lines == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "ui.max_log_lines".to_string(),
                reason: "Log line limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and use a single file
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
