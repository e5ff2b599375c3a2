// src/engine/executor.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::console::{Reporter, Severity};
use crate::errors::{BuildError, Result};
use crate::exec::ProcessBackend;
use crate::graph::TaskGraph;
use crate::types::{CommandOutcome, CommandSpec, Invocation, TaskOutcome};

/// Receiving end for fatal errors raised inside detached or watch-triggered
/// task runs. The main path turns the first one into a non-zero exit.
pub type FatalReceiver = mpsc::UnboundedReceiver<BuildError>;

type BoxedRun<'a> = Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + 'a>>;

/// Runs tasks from a [`TaskGraph`].
///
/// Cheap to clone; every clone shares the same graph, backend, reporter and
/// fatal-error channel.
#[derive(Clone)]
pub struct TaskExecutor {
    graph: Arc<TaskGraph>,
    backend: Arc<dyn ProcessBackend>,
    reporter: Arc<dyn Reporter>,
    fatal_tx: mpsc::UnboundedSender<BuildError>,
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

impl TaskExecutor {
    pub fn new(
        graph: Arc<TaskGraph>,
        backend: Arc<dyn ProcessBackend>,
        reporter: Arc<dyn Reporter>,
    ) -> (Self, FatalReceiver) {
        let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();
        let executor = Self {
            graph,
            backend,
            reporter,
            fatal_tx,
        };
        (executor, fatal_rx)
    }

    pub fn graph(&self) -> &Arc<TaskGraph> {
        &self.graph
    }

    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    /// Run the task called `name` and return once its command list is done.
    ///
    /// A leading `#` on `name`, or `force_detached`, runs every command of
    /// the task detached: each is started in order and none is waited for.
    /// Otherwise commands run one after another and the first failing one
    /// ends the task (`TaskOutcome::Terminated`); only a `#` on an
    /// individual command detaches that command.
    ///
    /// Errors are fatal: an unknown task or a missing variable. Command
    /// failures are not errors.
    pub fn run_task<'a>(&'a self, name: &'a str, force_detached: bool) -> BoxedRun<'a> {
        Box::pin(async move {
            let invocation = Invocation::from_task_name(name);
            let task_detached = invocation.detached || force_detached;

            let commands = self
                .graph
                .task(&invocation.name)
                .ok_or_else(|| BuildError::TaskNotFound(invocation.name.clone()))?;

            debug!(
                task = %invocation.name,
                detached = task_detached,
                commands = commands.len(),
                "running task"
            );

            for (index, command) in commands.iter().enumerate() {
                let outcome = self
                    .run_command(command, task_detached || command.is_detached())
                    .await?;

                let label = format!("{} [{}]", invocation.name, index);
                self.reporter.report(Severity::Notice, &label);

                if let CommandOutcome::Failed(code) = outcome {
                    info!(task = %invocation.name, index, exit_code = code, "task terminated");
                    self.reporter
                        .report(Severity::Notice, &format!("{label} TERMINATED"));
                    return Ok(TaskOutcome::Terminated { index, code });
                }
            }

            Ok(TaskOutcome::Completed)
        })
    }

    /// Run one command of a task.
    ///
    /// A task reference never launches a process itself; it runs the
    /// referenced task in the same mode. In blocking mode that task runs to
    /// its end before this returns. In detached mode all of its commands
    /// are merely started, so this returns as soon as they are launched.
    /// Either way the reference counts as a success: a failure inside the
    /// referenced task only ends that task.
    pub async fn run_command(&self, command: &CommandSpec, detached: bool) -> Result<CommandOutcome> {
        match command {
            CommandSpec::Task(invocation) => {
                self.run_task(&invocation.name, detached).await?;
                Ok(CommandOutcome::Success)
            }
            CommandSpec::Literal { text, .. } => {
                let resolved = self.graph.resolve(text)?;
                Ok(self.backend.launch(resolved, detached).await)
            }
        }
    }

    /// Start a task on its own Tokio task and return immediately.
    ///
    /// The run is never joined and its outcome is dropped. Fatal errors are
    /// forwarded to the [`FatalReceiver`].
    pub fn spawn_task(&self, invocation: Invocation) {
        let executor = self.clone();
        tokio::spawn(async move {
            if let Err(err) = executor
                .run_task(&invocation.name, invocation.detached)
                .await
            {
                executor.escalate(err);
            }
        });
    }

    fn escalate(&self, err: BuildError) {
        error!(error = %err, "fatal error in background task run");
        if self.fatal_tx.send(err).is_err() {
            debug!("fatal receiver dropped; error discarded");
        }
    }
}
