// src/console.rs

//! User-facing console output.
//!
//! This is separate from `tracing` diagnostics (see [`crate::logging`]):
//! the console carries command output and progress lines on stdout in a
//! fixed `LOG:` / `ERR:` / `RUN:` format, while `tracing` goes to stderr.

use std::fmt::Debug;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

/// Kind of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Command stdout.
    Plain,
    /// Command stderr and fatal errors.
    Error,
    /// Progress: finished command indices, watched directories.
    Notice,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Plain => "LOG",
            Severity::Error => "ERR",
            Severity::Notice => "RUN",
        }
    }
}

/// Sink for console lines.
///
/// Production code uses [`TerminalReporter`]; tests record lines instead.
pub trait Reporter: Send + Sync + Debug {
    fn report(&self, severity: Severity, message: &str);

    /// Wipe the terminal before a watch-triggered rerun.
    fn clear_screen(&self);
}

/// Prints to stdout, one line per message.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    silent: bool,
}

impl TerminalReporter {
    /// With `silent`, notice lines are dropped.
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    pub fn format_line(severity: Severity, message: &str) -> String {
        let body = match severity {
            Severity::Plain => message.to_string(),
            Severity::Error => message.red().bold().to_string(),
            Severity::Notice => message.green().bold().to_string(),
        };
        format!("{}: {}", severity.label(), body)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, severity: Severity, message: &str) {
        if severity == Severity::Notice && self.silent {
            return;
        }
        let line = Self::format_line(severity, message);
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }

    fn clear_screen(&self) {
        let mut out = io::stdout();
        if let Err(err) = execute!(out, Clear(ClearType::All), MoveTo(0, 0)) {
            tracing::debug!(error = %err, "failed to clear terminal");
        }
    }
}
