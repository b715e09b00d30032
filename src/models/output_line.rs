//! Output Line Model
//!
//! A single line captured from the packager's merged output stream,
//! tagged with its position, arrival time and detected log level.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// PyInstaller prefixes its log records with an elapsed-ms counter and a level,
/// e.g. `412 INFO: PyInstaller: 6.3.0`.
static LEVEL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\d+\s+)?(TRACE|DEBUG|INFO|DEPRECATION|WARNING|WARN|ERROR|CRITICAL|FATAL)\b:")
        .ok()
});

/// Severity detected from a line of packager output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    /// No recognizable level prefix
    #[default]
    Plain,
}

impl LogLevel {
    /// Detect the level of a packager log line
    pub fn detect(text: &str) -> Self {
        if text.starts_with("Traceback (most recent call last)") {
            return LogLevel::Error;
        }

        let Some(pattern) = LEVEL_PATTERN.as_ref() else {
            return LogLevel::Plain;
        };

        match pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        {
            Some("TRACE") | Some("DEBUG") => LogLevel::Debug,
            Some("INFO") => LogLevel::Info,
            Some("DEPRECATION") | Some("WARNING") | Some("WARN") => LogLevel::Warning,
            Some("ERROR") | Some("CRITICAL") | Some("FATAL") => LogLevel::Error,
            _ => LogLevel::Plain,
        }
    }
}

/// A single line of packager output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLine {
    /// Text without the trailing line terminator
    pub text: String,

    /// 1-based position in the output stream
    pub line_number: usize,

    /// Detected severity
    pub level: LogLevel,

    /// When this line was received
    pub timestamp: DateTime<Utc>,
}

impl OutputLine {
    /// Create a new output line, detecting its level
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        let text = text.into();
        Self {
            level: LogLevel::detect(&text),
            text,
            line_number,
            timestamp: Utc::now(),
        }
    }

    /// Decode a raw line read from the pipe.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD; one trailing `\n` or `\r\n` is stripped.
    pub fn from_raw(raw: &[u8], line_number: usize) -> Self {
        let mut end = raw.len();
        if end > 0 && raw[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && raw[end - 1] == b'\r' {
                end -= 1;
            }
        }
        Self::new(String::from_utf8_lossy(&raw[..end]).into_owned(), line_number)
    }

    /// Whether the line carries no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for OutputLine {
    fn from(text: &str) -> Self {
        Self::new(text, 0)
    }
}
