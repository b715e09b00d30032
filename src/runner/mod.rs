//! Build Runner
//!
//! Executes packager commands in the background and streams their output
//! back as [`BuildEvent`]s. The UI never blocks on a build: it drains the
//! returned [`BuildStream`] once per frame.
//!
//! ## Guarantees
//!
//! - One build at a time per runner; a second `start` while busy is
//!   rejected with [`Error::BuildInProgress`](crate::error::Error::BuildInProgress)
//! - Lines arrive in the order the packager produced them, stdout and
//!   stderr interleaved on a single pipe
//! - Every build ends with exactly one `Done`, and the runner is free again
//!   by the time `Done` is observed
//! - A missing packager is reported as `tool_not_found`, never as a crash

pub mod events;
pub mod process;
pub mod stream;

pub use events::BuildEvent;
pub use process::spawn_packager;
pub use stream::BuildStream;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use uuid::Uuid;

use crate::command::{CommandBuilder, PackagerCommand};
use crate::config::PackagerConfig;
use crate::error::{Error, Result};
use crate::models::{BuildConfig, BuildOutcome};
use crate::platform::is_command_available;

/// Marks the runner busy until dropped
pub(crate) struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Launches builds and hands back their event streams
#[derive(Debug, Clone, Default)]
pub struct BuildRunner {
    builder: CommandBuilder,
    in_flight: Arc<AtomicBool>,
}

impl BuildRunner {
    pub fn new(builder: CommandBuilder) -> Self {
        Self {
            builder,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runner for the configured packager program and extra arguments
    pub fn from_config(config: &PackagerConfig) -> Self {
        Self::new(CommandBuilder::new(&config.program).with_extra_args(config.extra_args.iter().cloned()))
    }

    pub fn builder(&self) -> &CommandBuilder {
        &self.builder
    }

    /// Whether a build is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the configured packager can be found
    pub fn tool_available(&self) -> bool {
        is_command_available(self.builder.program())
    }

    /// Validate `config`, build its command and start it.
    ///
    /// Resources skipped because they no longer exist are reported as
    /// `Warning` events right after `Started`.
    pub fn start_build(&self, config: &BuildConfig) -> Result<BuildStream> {
        if !config.has_valid_script() {
            return Err(Error::MissingScript {
                path: config.script_path.clone(),
            });
        }

        let built = self.builder.build_with_report(config);
        let warnings = built.skipped.iter().map(ToString::to_string).collect();
        self.launch(built.command, warnings)
    }

    /// Start an already-built command
    pub fn start(&self, command: PackagerCommand) -> Result<BuildStream> {
        self.launch(command, Vec::new())
    }

    fn launch(&self, command: PackagerCommand, warnings: Vec<String>) -> Result<BuildStream> {
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(Error::BuildInProgress)?;

        let id = Uuid::new_v4().to_string();
        let command_line = command.command_line();
        info!("Starting build {}: {}", id, command_line);

        let (tx, rx) = unbounded_channel();
        let stream = BuildStream::new(id, command_line.clone(), rx);

        // The receiver is alive in `stream`, so these sends cannot fail
        let _ = tx.send(BuildEvent::Started { command_line });
        for warning in warnings {
            warn!("{}", warning);
            let _ = tx.send(BuildEvent::Warning(warning));
        }

        if !is_command_available(command.program()) {
            error!("Packager '{}' not found", command.program());
            drop(guard);
            let _ = tx.send(BuildEvent::Done(BuildOutcome::tool_not_found(command.program())));
            return Ok(stream);
        }

        process::launch(command, tx, guard);
        Ok(stream)
    }
}
