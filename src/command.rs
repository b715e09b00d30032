//! Packager command construction
//!
//! Turns a [`BuildConfig`] into the argument vector for PyInstaller. The
//! rules are applied in a fixed order:
//!
//! 1. `pyinstaller --clean`
//! 2. `--onefile` if `onefile`
//! 3. `--windowed` if `windowed`
//! 4. `--icon=PATH` if an icon is set and exists
//! 5. `--add-data=SRC<SEP>DEST` per resource that still exists, where `DEST`
//!    is the directory's base name or `.` (bundle root) for files
//! 6. `--name=NAME`, `--distpath=DIR` when set
//! 7. configured extra arguments
//! 8. the entry script
//!
//! Resources that vanished since they were added are left out of the
//! command; the builder reports them so the caller can warn about it.
//! Building reads the filesystem but never modifies it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::BuildConfig;
use crate::platform::DATA_SEPARATOR;

/// Default packager executable
pub const DEFAULT_PACKAGER: &str = "pyinstaller";

pub const CLEAN_FLAG: &str = "--clean";
pub const ONEFILE_FLAG: &str = "--onefile";
pub const WINDOWED_FLAG: &str = "--windowed";
pub const ICON_FLAG: &str = "--icon";
pub const ADD_DATA_FLAG: &str = "--add-data";
pub const NAME_FLAG: &str = "--name";
pub const DISTPATH_FLAG: &str = "--distpath";

/// Destination denoting the root of the bundle
pub const BUNDLE_ROOT: &str = ".";

/// A program plus its arguments, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerCommand {
    program: String,
    args: Vec<String>,
}

impl PackagerCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Space-joined command line, as echoed in the build log
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }

    /// Whether any argument equals `flag` or starts with `flag=`
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args
            .iter()
            .any(|arg| arg == flag || arg.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')))
    }

    /// Values of every `flag=VALUE` argument, in order
    pub fn flag_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .iter()
            .filter_map(|arg| arg.strip_prefix(flag)?.strip_prefix('='))
            .collect()
    }

    /// A `std::process::Command` for this program and arguments
    pub fn to_std_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for PackagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// A resource left out of the command because it no longer exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedResource {
    pub source: PathBuf,
}

impl fmt::Display for SkippedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping missing resource: {}",
            self.source.display()
        )
    }
}

/// Command plus the resources that were skipped while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    pub command: PackagerCommand,
    pub skipped: Vec<SkippedResource>,
}

/// Builds packager commands for a configured program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    program: String,
    extra_args: Vec<String>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGER)
    }
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments appended after the generated flags, before the script
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the command for `config`
    pub fn build(&self, config: &BuildConfig) -> PackagerCommand {
        self.build_with_report(config).command
    }

    /// Build the command and report resources that were skipped
    pub fn build_with_report(&self, config: &BuildConfig) -> BuiltCommand {
        let mut args = vec![CLEAN_FLAG.to_string()];
        let mut skipped = Vec::new();

        if config.onefile {
            args.push(ONEFILE_FLAG.to_string());
        }
        if config.windowed {
            args.push(WINDOWED_FLAG.to_string());
        }
        if let Some(icon) = config.existing_icon() {
            args.push(format!("{}={}", ICON_FLAG, icon.display()));
        }

        for resource in &config.resources {
            let source = absolute_path(&resource.source);
            if !source.exists() {
                warn!("Skipping missing resource {}", source.display());
                skipped.push(SkippedResource {
                    source: resource.source.clone(),
                });
                continue;
            }
            args.push(format!(
                "{}={}{}{}",
                ADD_DATA_FLAG,
                source.display(),
                DATA_SEPARATOR,
                bundle_destination(&source)
            ));
        }

        if let Some(name) = &config.app_name {
            args.push(format!("{}={}", NAME_FLAG, name));
        }
        if let Some(dist) = &config.dist_dir {
            args.push(format!("{}={}", DISTPATH_FLAG, dist.display()));
        }

        args.extend(self.extra_args.iter().cloned());
        args.push(config.script_path.display().to_string());

        let command = PackagerCommand::new(self.program.clone(), args);
        debug!("Built packager command: {}", command);
        BuiltCommand { command, skipped }
    }
}

/// Build the command for `config` with the default packager
pub fn build_command(config: &BuildConfig) -> PackagerCommand {
    CommandBuilder::default().build(config)
}

/// Where a resource lands inside the bundle: a directory keeps its base
/// name, a file goes to the bundle root.
pub fn bundle_destination(source: &Path) -> String {
    if source.is_dir() {
        source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| BUNDLE_ROOT.to_string())
    } else {
        BUNDLE_ROOT.to_string()
    }
}

/// Make `path` absolute against the current directory without touching
/// symlinks or requiring the path to exist.
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
