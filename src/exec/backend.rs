// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The task executor talks to a `ProcessBackend` instead of spawning shells
//! directly. This makes it easy to swap in a fake backend in tests while
//! keeping the production implementation in [`command`](super::command).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::console::Reporter;
use crate::types::CommandOutcome;

use super::command::run_shell;

/// Trait abstracting how a resolved command line is executed.
///
/// Production code uses [`ShellBackend`]; tests can provide an
/// implementation that records commands without spawning processes.
pub trait ProcessBackend: Send + Sync {
    /// Execute `command` (variables already substituted).
    ///
    /// With `detached`, implementations must return without waiting for the
    /// command to finish.
    fn launch(
        &self,
        command: String,
        detached: bool,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>>;
}

/// Runs commands through the host shell and streams their output to a
/// [`Reporter`].
#[derive(Debug, Clone)]
pub struct ShellBackend {
    reporter: Arc<dyn Reporter>,
}

impl ShellBackend {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

impl ProcessBackend for ShellBackend {
    fn launch(
        &self,
        command: String,
        detached: bool,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>> {
        let reporter = Arc::clone(&self.reporter);
        Box::pin(async move { run_shell(&command, detached, reporter).await })
    }
}
