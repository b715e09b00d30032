//! Py2Win - A desktop front-end for PyInstaller
//!
//! This library provides the core of Py2Win: turning a set of build options
//! into a PyInstaller invocation, running it in the background while its
//! output streams into the UI, and saving those options as reusable
//! profiles.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`command`] - Command Builder: options to argument vector
//! - [`runner`] - Build Runner: background process, merged output stream
//! - [`profile`] - JSON build profiles
//! - [`models`] - Data structures (BuildConfig, ResourceList, OutputLine, BuildResult)
//! - [`config`] - Application configuration and its loader
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### UI Support
//!
//! - [`state`] - Window state: form, selection, log, status line
//! - [`ui`] - egui components
//! - [`platform`] - Unix/Windows differences (search path, separators, spawning)
//!
//! ## Quick Start
//!
//! ```no_run
//! use py2win::{BuildConfig, BuildRunner};
//!
//! # async fn demo() -> py2win::Result<()> {
//! let config = BuildConfig::new("app.py").with_windowed(true);
//! let result = BuildRunner::default().start_build(&config)?.collect().await;
//! println!("{}", result.plain_output());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Main Thread:** Runs the `egui` UI loop and drains build events each frame
//! - **Build Reader Thread:** Reads the packager's merged stdout/stderr (blocking I/O)
//!
//! Communication between the two happens over an unbounded `tokio::mpsc`
//! channel, so output is never dropped and the UI never blocks.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod command;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod profile;
pub mod runner;
pub mod state;

// UI modules
pub mod ui;

// Re-exports for core functionality
pub use command::{build_command, CommandBuilder, PackagerCommand};
pub use config::{Config, ConfigLoader};
pub use error::{Error, Result};
pub use models::{BuildConfig, BuildOutcome, BuildResult, BuildStatus, OutputLine, Resource, ResourceList};
pub use profile::{load_profile, save_profile, Profile};
pub use runner::{BuildEvent, BuildRunner, BuildStream};
pub use state::AppState;

// Version information
/// The current version of Py2Win from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name shown in the window title
pub const NAME: &str = "Py2Win";

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load the configuration, trying `config_path` first.
///
/// A file that cannot be parsed is skipped in favor of the next candidate;
/// a file that parses but holds invalid values is an error.
pub fn init(config_path: Option<&std::path::Path>) -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "Configuration file does not exist".to_string(),
            });
        }
    }

    let mut loader = ConfigLoader::with_explicit_path(config_path.map(|p| p.to_path_buf()));
    let config = loader.load_config()?;

    match loader.current_path() {
        Some(path) => debug!("Using configuration {}", path.display()),
        None => debug!("Using default configuration"),
    }
    Ok(config)
}

/// Describe a startup failure with hints for the user
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check the path passed to --config\n• Ensure file permissions are correct",
                path.display(),
                reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check the configuration value\n• Remove the key to use its default",
                field, reason
            )
        }
        Error::InvalidProfile { path, reason } => {
            format!(
                "Profile Error: '{}' could not be read: {}\n\nTry:\n• Check that the file is a JSON object\n• Save the profile again from the window",
                path.display(),
                reason
            )
        }
        _ => format!("Unexpected Error: {}", error),
    }
}
