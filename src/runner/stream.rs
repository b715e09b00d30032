//! Build Streams
//!
//! Consumer end of a running build. Wraps the unbounded channel fed by the
//! reader thread and tracks the build's status as events are observed.
//!
//! The channel never drops messages, so a consumer that drains slower than
//! the packager writes still sees every line, in order, exactly once.

use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::events::BuildEvent;
use crate::models::{BuildOutcome, BuildResult, BuildStatus};

/// Receiving side of one build
pub struct BuildStream {
    /// Identifier shared with the build's log records
    id: String,
    /// Command line echoed at start
    command_line: String,
    /// Events from the reader thread
    events: UnboundedReceiver<BuildEvent>,
    /// Status as of the last observed event
    status: BuildStatus,
    /// When the build was launched
    started: Instant,
    /// Time from launch until the terminal event was observed
    elapsed: Option<Duration>,
}

impl BuildStream {
    pub(crate) fn new(
        id: String,
        command_line: String,
        events: UnboundedReceiver<BuildEvent>,
    ) -> Self {
        Self {
            id,
            command_line,
            events,
            status: BuildStatus::Running,
            started: Instant::now(),
            elapsed: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Time from launch until `Done`, once observed
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Take the next queued event without waiting
    pub fn try_next(&mut self) -> Option<BuildEvent> {
        if self.is_finished() {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.on_closed(),
        }
    }

    /// Wait for the next event; `None` once the build has finished
    pub async fn next(&mut self) -> Option<BuildEvent> {
        if self.is_finished() {
            return None;
        }
        match self.events.recv().await {
            Some(event) => Some(self.observe(event)),
            None => self.on_closed(),
        }
    }

    /// Blocking variant of [`next`](Self::next) for callers outside an async
    /// runtime. Panics if called from within one.
    pub fn blocking_next(&mut self) -> Option<BuildEvent> {
        if self.is_finished() {
            return None;
        }
        match self.events.blocking_recv() {
            Some(event) => Some(self.observe(event)),
            None => self.on_closed(),
        }
    }

    /// Take every event queued right now, stopping after `Done`
    pub fn drain_pending(&mut self) -> Vec<BuildEvent> {
        let mut drained = Vec::new();
        while let Some(event) = self.try_next() {
            drained.push(event);
        }
        drained
    }

    /// Wait for the build to finish and gather everything it produced
    pub async fn collect(mut self) -> BuildResult {
        let mut result = BuildResult::new(self.command_line.clone());
        result.id = self.id.clone();
        result.mark_running();

        while let Some(event) = self.next().await {
            match event {
                BuildEvent::Started { command_line } => result.command_line = command_line,
                BuildEvent::Warning(warning) => result.warnings.push(warning),
                BuildEvent::Line(line) => result.add_line(line),
                BuildEvent::Done(outcome) => {
                    result.finish(outcome, self.elapsed.unwrap_or_default());
                }
            }
        }

        result
    }

    fn observe(&mut self, event: BuildEvent) -> BuildEvent {
        if let BuildEvent::Done(outcome) = &event {
            self.status = outcome.status();
            self.elapsed = Some(self.started.elapsed());
            debug!("Build {} finished: {}", self.id, outcome);
        }
        event
    }

    /// The sender went away without a terminal event (reader thread died);
    /// surface that as an internal failure so consumers always see `Done`.
    fn on_closed(&mut self) -> Option<BuildEvent> {
        if self.is_finished() {
            return None;
        }
        error!("Build {} stream closed before completion", self.id);
        Some(self.observe(BuildEvent::Done(BuildOutcome::internal(
            "Build output stream closed unexpectedly",
        ))))
    }
}

impl std::fmt::Debug for BuildStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildStream")
            .field("id", &self.id)
            .field("command_line", &self.command_line)
            .field("status", &self.status)
            .finish()
    }
}
