//! Build Result Model
//!
//! Lifecycle and terminal outcome of one packager invocation.
//!
//! ```text
//! Idle ──▶ Running ──▶ Succeeded
//!                  └─▶ Failed
//! ```
//!
//! Terminal states are final; a new build always starts from a fresh `Idle`.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::models::OutputLine;

/// Execution status of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BuildStatus {
    /// Nothing launched yet
    #[default]
    Idle,
    /// Packager is running
    Running,
    /// Packager exited with code 0
    Succeeded,
    /// Packager could not be launched, failed, or the stream broke
    Failed,
}

impl BuildStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildStatus::Succeeded | BuildStatus::Failed)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, BuildStatus::Running)
    }
}

/// Why a build failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Packager executable not found; nothing was spawned
    ToolNotFound,
    /// Packager ran and exited with a non-zero code
    NonzeroExit { code: i32 },
    /// Unexpected failure while spawning or reading output
    InternalError,
}

impl FailureKind {
    /// Stable snake_case name of the failure category
    pub fn category(&self) -> &'static str {
        match self {
            FailureKind::ToolNotFound => "tool_not_found",
            FailureKind::NonzeroExit { .. } => "nonzero_exit",
            FailureKind::InternalError => "internal_error",
        }
    }

    /// Whether the packager never got to run
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, FailureKind::ToolNotFound)
    }
}

/// Terminal outcome delivered once at the end of every build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildOutcome {
    Succeeded,
    Failed { kind: FailureKind, message: String },
}

impl BuildOutcome {
    pub fn tool_not_found(tool: &str) -> Self {
        BuildOutcome::Failed {
            kind: FailureKind::ToolNotFound,
            message: format!("{} command not found.", tool),
        }
    }

    pub fn nonzero_exit(code: i32) -> Self {
        BuildOutcome::Failed {
            kind: FailureKind::NonzeroExit { code },
            message: format!("Build failed with exit code {}", code),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        BuildOutcome::Failed {
            kind: FailureKind::InternalError,
            message: message.into(),
        }
    }

    /// Map a process exit code; zero is the only success signal
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            BuildOutcome::Succeeded
        } else {
            BuildOutcome::nonzero_exit(code)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Succeeded)
    }

    /// Exit code of the packager, if it ran to completion
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BuildOutcome::Succeeded => Some(0),
            BuildOutcome::Failed {
                kind: FailureKind::NonzeroExit { code },
                ..
            } => Some(*code),
            BuildOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            BuildOutcome::Succeeded => None,
            BuildOutcome::Failed { kind, .. } => Some(*kind),
        }
    }

    /// Status this outcome moves a build into
    pub fn status(&self) -> BuildStatus {
        if self.is_success() {
            BuildStatus::Succeeded
        } else {
            BuildStatus::Failed
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Succeeded => write!(f, "succeeded"),
            BuildOutcome::Failed { kind, message } => {
                write!(f, "{}: {}", kind.category(), message)
            }
        }
    }
}

/// Complete record of one build: command, captured lines, and outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResult {
    /// Unique identifier for the build
    pub id: String,

    /// Command line as echoed before the run
    pub command_line: String,

    /// Every captured line, in the order produced
    pub lines: Vec<OutputLine>,

    /// Warnings raised while preparing the command (skipped resources, ...)
    pub warnings: Vec<String>,

    /// Current lifecycle state
    pub status: BuildStatus,

    /// Terminal outcome (None while running)
    pub outcome: Option<BuildOutcome>,

    /// When the build was started (in local time)
    pub started_at: DateTime<Local>,

    /// Wall-clock duration (None while running)
    pub duration: Option<Duration>,
}

impl BuildResult {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            command_line: command_line.into(),
            lines: Vec::new(),
            warnings: Vec::new(),
            status: BuildStatus::Idle,
            outcome: None,
            started_at: Local::now(),
            duration: None,
        }
    }

    /// Move from `Idle` to `Running`; ignored once terminal
    pub fn mark_running(&mut self) {
        if self.status == BuildStatus::Idle {
            self.status = BuildStatus::Running;
        }
    }

    /// Record the terminal outcome; the first outcome wins
    pub fn finish(&mut self, outcome: BuildOutcome, duration: Duration) {
        if self.status.is_terminal() {
            warn!("Ignoring second outcome for build {}: {}", self.id, outcome);
            return;
        }
        self.status = outcome.status();
        self.outcome = Some(outcome);
        self.duration = Some(duration);
    }

    pub fn add_line(&mut self, line: OutputLine) {
        self.lines.push(line);
    }

    pub fn is_success(&self) -> bool {
        self.status == BuildStatus::Succeeded
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.outcome.as_ref().and_then(BuildOutcome::exit_code)
    }

    /// Captured output joined with newlines
    pub fn plain_output(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
