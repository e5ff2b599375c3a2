use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use buildwatch::exec::ProcessBackend;
use buildwatch::types::CommandOutcome;

/// One command handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub command: String,
    pub detached: bool,
}

/// A fake process backend that:
/// - records every launched command line and its mode
/// - reports `Success` for blocking commands unless told to fail them
/// - reports `Detached` for detached commands without waiting.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    launched: Arc<Mutex<Vec<Launch>>>,
    exit_codes: Arc<Mutex<HashMap<String, i32>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` exit with `code` when run blocking.
    pub fn fail_with(self, command: &str, code: i32) -> Self {
        self.exit_codes
            .lock()
            .unwrap()
            .insert(command.to_string(), code);
        self
    }

    pub fn launched(&self) -> Vec<Launch> {
        self.launched.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.launched().into_iter().map(|l| l.command).collect()
    }
}

impl ProcessBackend for FakeBackend {
    fn launch(
        &self,
        command: String,
        detached: bool,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + '_>> {
        let launched = Arc::clone(&self.launched);
        let exit_codes = Arc::clone(&self.exit_codes);

        Box::pin(async move {
            launched.lock().unwrap().push(Launch {
                command: command.clone(),
                detached,
            });

            if detached {
                return CommandOutcome::Detached;
            }

            match exit_codes.lock().unwrap().get(&command) {
                Some(0) | None => CommandOutcome::Success,
                Some(code) => CommandOutcome::Failed(*code),
            }
        })
    }
}
