// src/types.rs

//! Small shared value types.

use std::fmt;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// A request to run a task, with its execution mode already decided.
///
/// Produced once from strings like `build`, `#serve`, `${build}` or
/// `#${serve}` so that downstream code never has to look at `#` prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invocation {
    pub name: TaskName,
    pub detached: bool,
}

impl Invocation {
    pub fn blocking(name: impl Into<TaskName>) -> Self {
        Self {
            name: name.into(),
            detached: false,
        }
    }

    pub fn detached(name: impl Into<TaskName>) -> Self {
        Self {
            name: name.into(),
            detached: true,
        }
    }

    /// Parse a bare task name as given on the command line.
    ///
    /// A leading `#` requests detached execution and is not part of the name.
    pub fn from_task_name(raw: &str) -> Self {
        match raw.strip_prefix('#') {
            Some(name) => Self::detached(name),
            None => Self::blocking(raw),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detached {
            write!(f, "#{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// One entry of a task's command list, parsed once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Shell text, possibly containing `${variable}` tokens that are resolved
    /// right before launch.
    Literal { text: String, detached: bool },
    /// A whole-string `${task}` / `#${task}` reference to another task.
    Task(Invocation),
}

impl CommandSpec {
    pub fn is_detached(&self) -> bool {
        match self {
            CommandSpec::Literal { detached, .. } => *detached,
            CommandSpec::Task(invocation) => invocation.detached,
        }
    }
}

/// Result of running a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Exit code of the process, or -1 when it could not be launched or was
    /// killed by a signal.
    Failed(i32),
    /// Started in the background; the exit status is never observed.
    Detached,
}

impl CommandOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CommandOutcome::Failed(_))
    }
}

/// How a task's command list ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Every command ran (or was started, for detached commands).
    Completed,
    /// The command at `index` failed and the rest were skipped.
    Terminated { index: usize, code: i32 },
}
