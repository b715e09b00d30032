//! Packager Process Spawning
//!
//! Launches the packager with stdout and stderr joined onto one pipe, so
//! the log shows lines in the order the packager produced them, and pumps
//! that pipe from a dedicated reader thread into the build's channel.

use std::io::{self, BufRead, BufReader, PipeReader};
use std::process::{Child, Stdio};
use std::thread;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

use super::events::BuildEvent;
use super::InFlightGuard;
use crate::command::PackagerCommand;
use crate::error::{Error, Result};
use crate::models::{BuildOutcome, OutputLine};
use crate::platform::Platform;

/// Name given to the reader thread
const READER_THREAD_NAME: &str = "py2win-build";

/// Initial capacity of the line buffer
const LINE_BUFFER_CAPACITY: usize = 256;

/// Spawn the packager with merged output.
///
/// Stdin is closed so the packager can never stall waiting for input.
pub fn spawn_packager(command: &PackagerCommand) -> Result<(Child, PipeReader)> {
    let (reader, writer) = io::pipe()?;
    let stderr_writer = writer.try_clone()?;

    let mut cmd = command.to_std_command();
    cmd.stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer);
    Platform::configure_child(&mut cmd);

    let child = cmd.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::ToolNotFound {
            tool: command.program().to_string(),
        },
        _ => Error::Internal {
            reason: format!("Failed to start '{}': {}", command.program(), e),
        },
    })?;

    // The parent's copies of the write end must close, or the reader never
    // sees EOF.
    drop(cmd);

    debug!("Spawned packager pid {}", child.id());
    Ok((child, reader))
}

/// Run `command` to completion on a reader thread, reporting through `tx`.
///
/// Always ends with exactly one `Done`; the in-flight guard is released just
/// before it is sent.
pub(crate) fn launch(
    command: PackagerCommand,
    tx: UnboundedSender<BuildEvent>,
    guard: InFlightGuard,
) {
    let (child, reader) = match spawn_packager(&command) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!("Failed to launch packager: {}", e);
            finish(&tx, guard, outcome_for_error(&e, &command));
            return;
        }
    };

    let thread_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(READER_THREAD_NAME.to_string())
        .spawn(move || {
            let outcome = supervise(child, reader, &thread_tx);
            finish(&thread_tx, guard, outcome);
        });

    // On spawn failure the closure, and with it the guard and child, has
    // already been dropped.
    if let Err(e) = spawned {
        error!("Failed to start build reader thread: {}", e);
        let _ = tx.send(BuildEvent::Done(BuildOutcome::internal(format!(
            "Failed to start build reader thread: {}",
            e
        ))));
    }
}

/// Pump output until EOF, then reap the child and map its exit status
fn supervise(mut child: Child, reader: PipeReader, tx: &UnboundedSender<BuildEvent>) -> BuildOutcome {
    let started = Instant::now();

    let lines = match pump_lines(reader, tx) {
        Ok(lines) => lines,
        Err(e) => {
            error!("Error reading packager output: {}", e);
            let _ = child.kill();
            let _ = child.wait();
            return BuildOutcome::internal(format!("Failed to read packager output: {}", e));
        }
    };

    match child.wait() {
        Ok(status) => {
            // No code means the packager was killed by a signal
            let code = status.code().unwrap_or(-1);
            info!(
                "Packager exited with code {} after {} lines in {:?}",
                code,
                lines,
                started.elapsed()
            );
            BuildOutcome::from_exit_code(code)
        }
        Err(e) => {
            error!("Failed to wait for packager: {}", e);
            BuildOutcome::internal(format!("Failed to wait for packager: {}", e))
        }
    }
}

/// Forward each line of `reader` as a `Line` event; returns the line count.
///
/// Bytes are decoded lossily so undecodable output never aborts the build.
/// Reading continues after the receiver goes away so the packager is never
/// blocked on a full pipe.
fn pump_lines(reader: PipeReader, tx: &UnboundedSender<BuildEvent>) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::with_capacity(LINE_BUFFER_CAPACITY);
    let mut line_number = 0;
    let mut receiver_gone = false;

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                line_number += 1;
                if receiver_gone {
                    continue;
                }
                let line = OutputLine::from_raw(&buffer, line_number);
                if tx.send(BuildEvent::Line(line)).is_err() {
                    debug!("Build receiver dropped; discarding remaining output");
                    receiver_gone = true;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(line_number)
}

fn finish(tx: &UnboundedSender<BuildEvent>, guard: InFlightGuard, outcome: BuildOutcome) {
    drop(guard);
    if tx.send(BuildEvent::Done(outcome)).is_err() {
        debug!("Build receiver dropped before completion");
    }
}

fn outcome_for_error(error: &Error, command: &PackagerCommand) -> BuildOutcome {
    match error {
        Error::ToolNotFound { tool } => BuildOutcome::tool_not_found(tool),
        other => {
            BuildOutcome::internal(format!("Failed to run '{}': {}", command.program(), other))
        }
    }
}
