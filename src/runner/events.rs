//! Build Events
//!
//! Messages sent from the build's reader thread to whoever consumes the
//! build (the UI loop or headless mode). Every build produces exactly one
//! `Started` first and exactly one `Done` last; nothing follows `Done`.

use crate::models::{BuildOutcome, OutputLine};

/// Message delivered from a running build
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// The command about to be launched
    Started { command_line: String },
    /// Non-fatal notice raised while preparing the build
    Warning(String),
    /// One line of merged stdout/stderr, in production order
    Line(OutputLine),
    /// Terminal outcome; always the final event
    Done(BuildOutcome),
}

impl BuildEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, BuildEvent::Done(_))
    }

    /// The output line carried by this event, if any
    pub fn as_line(&self) -> Option<&OutputLine> {
        match self {
            BuildEvent::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The outcome carried by this event, if it is terminal
    pub fn outcome(&self) -> Option<&BuildOutcome> {
        match self {
            BuildEvent::Done(outcome) => Some(outcome),
            _ => None,
        }
    }
}
