//! Core data models for Py2Win
//!
//! Build configuration snapshots, bundled resources, captured output
//! lines and build outcomes.

pub mod build_config;
pub mod build_result;
pub mod output_line;
pub mod resource;

// Re-exports for convenience
pub use build_config::BuildConfig;
pub use build_result::{BuildOutcome, BuildResult, BuildStatus, FailureKind};
pub use output_line::{LogLevel, OutputLine};
pub use resource::{Resource, ResourceKind, ResourceList};
