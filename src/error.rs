//! Error types and Result aliases for Py2Win

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Py2Win operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Py2Win
#[derive(Debug, Error)]
pub enum Error {
    // === Build errors ===
    /// No valid entry script was selected
    #[error("Entry script '{}' does not exist", path.display())]
    MissingScript { path: PathBuf },

    /// The packager executable is not on the search path
    #[error("Command '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// Unexpected failure while spawning or reading the packager
    #[error("Internal build error: {reason}")]
    Internal { reason: String },

    /// A build is already running on this runner
    #[error("A build is already in progress")]
    BuildInProgress,

    // === Profile errors ===
    /// Profile document unreadable or malformed
    #[error("Invalid profile '{}': {reason}", path.display())]
    InvalidProfile { path: PathBuf, reason: String },

    /// Failed to write a profile document
    #[error("Failed to save profile to '{}': {reason}", path.display())]
    ProfileSaveFailed { path: PathBuf, reason: String },

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Failed to save configuration file
    #[error("Failed to save config to '{}': {reason}", path.display())]
    ConfigSaveFailed { path: PathBuf, reason: String },

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Stable snake_case name of the error category, used in logs and status text
    pub fn category(&self) -> &'static str {
        match self {
            Error::MissingScript { .. } => "missing_script",
            Error::ToolNotFound { .. } => "tool_not_found",
            Error::Internal { .. } | Error::Io(_) | Error::Serde(_) => "internal_error",
            Error::BuildInProgress => "build_in_progress",
            Error::InvalidProfile { .. } => "invalid_profile",
            Error::ProfileSaveFailed { .. } => "profile_save_failed",
            Error::ConfigLoadFailed { .. }
            | Error::ConfigParseFailed { .. }
            | Error::ConfigSaveFailed { .. }
            | Error::ConfigValidationFailed { .. } => "config_error",
        }
    }

    /// Message suitable for the status line of the UI shell
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingScript { .. } => "Error: Please select a valid Python script.".to_string(),
            Error::ToolNotFound { .. } => "Error: PyInstaller not found!".to_string(),
            Error::InvalidProfile { .. } => "Error: Invalid or corrupt profile file.".to_string(),
            Error::ProfileSaveFailed { reason, .. } => format!("Error saving profile: {}", reason),
            Error::BuildInProgress => "A build is already running.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}
