//! Application State Management
//!
//! Everything the window shows, kept free of any widget code so it can be
//! driven and tested without a display: the build form, the resource
//! selection, the log, and the status line.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::models::{BuildConfig, BuildOutcome, BuildStatus, FailureKind, LogLevel, Resource, ResourceList};
use crate::runner::BuildEvent;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_BUILDING: &str = "Building... See log for details.";
pub const STATUS_SUCCEEDED: &str = "Build successful!";
pub const STATUS_FAILED: &str = "Build failed. Check log for details.";
pub const STATUS_TOOL_MISSING: &str = "Error: PyInstaller not found!";

pub const BUILD_LABEL: &str = "Build Executable";
pub const BUILDING_LABEL: &str = "Building...";
pub const TOOL_MISSING_LABEL: &str = "PyInstaller Not Found";

const INSTALL_HINT: &str = "Please install it using: pip install pyinstaller";

/// Values entered in the build form.
///
/// Persisted between sessions; the selection is transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildForm {
    pub script_path: String,
    pub icon_path: String,
    pub windowed: bool,
    pub onefile: bool,
    pub app_name: String,
    pub dist_dir: String,
    pub resources: ResourceList,
    #[serde(skip)]
    selected: BTreeSet<usize>,
}

impl Default for BuildForm {
    fn default() -> Self {
        Self {
            script_path: String::new(),
            icon_path: String::new(),
            windowed: false,
            onefile: true,
            app_name: String::new(),
            dist_dir: String::new(),
            resources: ResourceList::new(),
            selected: BTreeSet::new(),
        }
    }
}

impl BuildForm {
    /// Configuration for a build started right now
    pub fn snapshot(&self) -> BuildConfig {
        BuildConfig::new(self.script_path.trim())
            .with_windowed(self.windowed)
            .with_onefile(self.onefile)
            .with_icon(self.icon_path.trim())
            .with_resources(self.resources.clone())
            .with_app_name(self.app_name.as_str())
            .with_dist_dir(self.dist_dir.trim())
    }

    /// Replace every field with the values of `config`
    pub fn apply_config(&mut self, config: &BuildConfig) {
        let to_string = |path: &Path| path.to_string_lossy().into_owned();
        self.script_path = to_string(&config.script_path);
        self.icon_path = config.icon_path.as_deref().map(to_string).unwrap_or_default();
        self.windowed = config.windowed;
        self.onefile = config.onefile;
        self.app_name = config.app_name.clone().unwrap_or_default();
        self.dist_dir = config.dist_dir.as_deref().map(to_string).unwrap_or_default();
        self.resources = config.resources.clone();
        self.selected.clear();
    }

    /// Add files; returns how many were new
    pub fn add_files<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.resources.extend(paths.into_iter().map(Resource::file))
    }

    /// Add a folder; returns `false` if it was already listed
    pub fn add_folder(&mut self, path: PathBuf) -> bool {
        self.resources.add(Resource::directory(path))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Toggle `index` in the selection; with `extend` false the selection
    /// is replaced instead.
    pub fn select(&mut self, index: usize, extend: bool) {
        if index >= self.resources.len() {
            return;
        }
        if extend {
            if !self.selected.remove(&index) {
                self.selected.insert(index);
            }
        } else {
            self.selected.clear();
            self.selected.insert(index);
        }
    }

    pub fn selection(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Remove every selected resource; returns how many were removed
    pub fn remove_selected(&mut self) -> usize {
        let indices = self.selection();
        self.selected.clear();
        self.resources.remove_many(&indices).len()
    }
}

/// What produced a log entry, which decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// Packager output, with its detected level
    Output(LogLevel),
    /// The echoed command line
    Command,
    /// Success banner
    Success,
    /// Failure banner or error notice
    Failure,
    /// Anything else the application says
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub source: LogSource,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, source: LogSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Capped log shown under the form
#[derive(Debug, Clone)]
pub struct BuildLog {
    entries: VecDeque<LogEntry>,
    max_lines: usize,
    discarded: usize,
}

impl BuildLog {
    pub fn new(max_lines: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_lines: max_lines.max(1),
            discarded: 0,
        }
    }

    /// Append, dropping the oldest entry once the cap is reached
    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.max_lines {
            self.entries.pop_front();
            self.discarded += 1;
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.discarded = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped from the front since the last clear
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// All entries joined by newlines, for the clipboard
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// State of the main window
#[derive(Debug, Clone)]
pub struct AppState {
    pub form: BuildForm,
    pub log: BuildLog,
    pub status: String,
    pub build_status: BuildStatus,
    pub tool_available: bool,
    pub auto_scroll: bool,
}

impl AppState {
    pub fn new(max_log_lines: usize) -> Self {
        Self {
            form: BuildForm::default(),
            log: BuildLog::new(max_log_lines),
            status: STATUS_READY.to_string(),
            build_status: BuildStatus::Idle,
            tool_available: true,
            auto_scroll: true,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry::new(text, LogSource::Notice));
    }

    fn failure(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry::new(text, LogSource::Failure));
    }

    /// Record the result of probing for the packager
    pub fn set_tool_available(&mut self, available: bool) {
        self.tool_available = available;
        if available {
            if self.status == STATUS_TOOL_MISSING {
                self.set_status(STATUS_READY);
            }
        } else {
            self.failure("ERROR: PyInstaller is not installed or not in your system's PATH.");
            self.failure(INSTALL_HINT);
            self.set_status(STATUS_TOOL_MISSING);
        }
    }

    pub fn is_building(&self) -> bool {
        self.build_status.is_running()
    }

    /// Whether the build trigger should be enabled
    pub fn can_build(&self) -> bool {
        self.tool_available && !self.is_building()
    }

    pub fn build_button_label(&self) -> &'static str {
        if !self.tool_available {
            TOOL_MISSING_LABEL
        } else if self.is_building() {
            BUILDING_LABEL
        } else {
            BUILD_LABEL
        }
    }

    /// Validate the form before launching; clears the log on success
    pub fn prepare_build(&mut self) -> Option<BuildConfig> {
        let config = self.form.snapshot();
        if !config.has_valid_script() {
            let err = Error::MissingScript {
                path: config.script_path,
            };
            self.build_rejected(&err);
            return None;
        }

        self.log.clear();
        self.build_status = BuildStatus::Running;
        self.set_status(STATUS_BUILDING);
        Some(config)
    }

    /// The runner refused to start; the form stays usable
    pub fn build_rejected(&mut self, err: &Error) {
        let message = err.user_message();
        self.failure(message.clone());
        self.set_status(message);
        if self.build_status.is_running() {
            self.build_status = BuildStatus::Failed;
        }
    }

    /// Fold one event from the running build into the view
    pub fn apply_event(&mut self, event: BuildEvent) {
        match event {
            BuildEvent::Started { command_line } => {
                self.build_status = BuildStatus::Running;
                self.log.push(LogEntry::new(
                    format!("Running command: {}", command_line),
                    LogSource::Command,
                ));
            }
            BuildEvent::Warning(warning) => {
                self.log
                    .push(LogEntry::new(warning, LogSource::Output(LogLevel::Warning)));
            }
            BuildEvent::Line(line) => {
                self.log.push(LogEntry::new(line.text, LogSource::Output(line.level)));
            }
            BuildEvent::Done(outcome) => self.finish(&outcome),
        }
    }

    fn finish(&mut self, outcome: &BuildOutcome) {
        self.build_status = outcome.status();
        match outcome {
            BuildOutcome::Succeeded => {
                self.log
                    .push(LogEntry::new("--- Build successful! ---", LogSource::Success));
                self.set_status(STATUS_SUCCEEDED);
            }
            BuildOutcome::Failed { kind, message } => {
                match kind {
                    FailureKind::NonzeroExit { code } => {
                        self.failure(format!("--- Build failed with exit code {} ---", code));
                    }
                    FailureKind::ToolNotFound => {
                        self.failure("--- ERROR: pyinstaller command not found. ---");
                        self.failure(INSTALL_HINT);
                    }
                    FailureKind::InternalError => {
                        self.failure(format!("--- An unexpected error occurred: {} ---", message));
                    }
                }
                self.set_status(STATUS_FAILED);
            }
        }
    }

    /// Remove the selected resources and report it
    pub fn remove_selected_resources(&mut self) {
        let removed = self.form.remove_selected();
        if removed > 0 {
            self.set_status(format!("Removed {} item(s).", removed));
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::config::UiConfig::default().max_log_lines)
    }
}
