// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::console::{Reporter, TerminalReporter};
use crate::engine::{FatalReceiver, TaskExecutor};
use crate::errors::Result;
use crate::exec::ShellBackend;
use crate::graph::TaskGraph;
use crate::types::CommandSpec;
use crate::watch::{DispatchOptions, NotifyWatcher, WatchDispatcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and variable pre-resolution
/// - the task executor and its shell backend
/// - (if any watch bindings exist) the watch dispatcher
/// - the initial task run
/// - staying alive for the watch loop until a fatal error or Ctrl-C
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let graph = Arc::new(TaskGraph::from_config(cfg)?);

    if args.dry_run {
        print_dry_run(&graph);
        return Ok(());
    }

    let reporter: Arc<dyn Reporter> = Arc::new(TerminalReporter::new(args.silent));
    let backend = Arc::new(ShellBackend::new(Arc::clone(&reporter)));
    let (executor, mut fatal_rx) = TaskExecutor::new(Arc::clone(&graph), backend, reporter);

    // Watch setup happens before the initial run so writes made by the
    // initial task are already observed.
    let _watch_handle = if graph.has_watches() {
        let options = DispatchOptions {
            root: std::env::current_dir()?,
            keep_log: args.keep,
        };
        let (watcher, events) = NotifyWatcher::new()?;
        let mut dispatcher = WatchDispatcher::new(executor.clone(), watcher, options)?;
        dispatcher.setup()?;
        Some(dispatcher.spawn(events))
    } else {
        None
    };

    let outcome = executor.run_task(&args.task, false).await?;
    debug!(task = %args.task, ?outcome, "initial task finished");

    if !graph.has_watches() {
        return match fatal_rx.try_recv() {
            Ok(err) => Err(err),
            Err(_) => Ok(()),
        };
    }

    wait_for_shutdown(&mut fatal_rx).await
}

/// Block until a background task run reports a fatal error or Ctrl-C.
async fn wait_for_shutdown(fatal_rx: &mut FatalReceiver) -> Result<()> {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        fatal = fatal_rx.recv() => match fatal {
            Some(err) => Err(err),
            None => {
                info!("watch loop ended; exiting");
                Ok(())
            }
        },
        _ = ctrl_c => {
            info!("Ctrl+C received; exiting");
            Ok(())
        }
    }
}

/// Simple dry-run output: print resolved variables, tasks and watches.
fn print_dry_run(graph: &TaskGraph) {
    println!("buildwatch dry-run");
    println!();

    println!("variables ({}):", graph.variables().len());
    for (name, value) in graph.variables().iter() {
        println!("  {name} = {value}");
    }
    println!();

    println!("tasks:");
    for name in graph.task_names() {
        println!("  - {name}");
        for (index, command) in graph.task(name).unwrap_or_default().iter().enumerate() {
            let mode = if command.is_detached() { " (detached)" } else { "" };
            match command {
                CommandSpec::Literal { text, .. } => {
                    println!("      [{index}] {text}{mode}");
                }
                CommandSpec::Task(invocation) => {
                    println!("      [{index}] -> task {}{mode}", invocation.name);
                }
            }
        }
    }
    println!();

    println!("watch ({}):", graph.watches().len());
    for binding in graph.watches() {
        println!("  {} -> {}", binding.pattern, binding.target);
    }

    debug!("dry-run complete (no execution)");
}
