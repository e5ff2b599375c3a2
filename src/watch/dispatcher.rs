// src/watch/dispatcher.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::Event;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::console::Severity;
use crate::engine::TaskExecutor;
use crate::errors::Result;
use crate::types::Invocation;
use crate::watch::patterns::{compile_patterns, WatchPattern};
use crate::watch::watcher::{is_write_event, DirectoryWatcher, EventReceiver};

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Directory that relative watch patterns are evaluated against.
    pub root: PathBuf,
    /// Keep previous output instead of clearing the screen on retrigger.
    pub keep_log: bool,
}

/// Turns filesystem writes into task runs.
///
/// Lifecycle: [`new`](Self::new) compiles the watch bindings,
/// [`setup`](Self::setup) subscribes to every directory holding a matching
/// file, and [`spawn`](Self::spawn) moves the dispatcher onto its own Tokio
/// task to service events.
pub struct WatchDispatcher<W: DirectoryWatcher> {
    watcher: W,
    registry: BTreeSet<PathBuf>,
    patterns: Arc<Vec<WatchPattern>>,
    executor: TaskExecutor,
    options: DispatchOptions,
}

impl<W: DirectoryWatcher> std::fmt::Debug for WatchDispatcher<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchDispatcher")
            .field("registry", &self.registry)
            .field("patterns", &self.patterns)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<W: DirectoryWatcher> WatchDispatcher<W> {
    /// Compile the watch bindings against `options.root`.
    ///
    /// The root is canonicalized when possible so that it lines up with the
    /// paths the platform watcher reports.
    pub fn new(executor: TaskExecutor, watcher: W, mut options: DispatchOptions) -> Result<Self> {
        if let Ok(canonical) = options.root.canonicalize() {
            options.root = canonical;
        }
        let patterns = compile_patterns(executor.graph(), &options.root)?;
        Ok(Self {
            watcher,
            registry: BTreeSet::new(),
            patterns: Arc::new(patterns),
            executor,
            options,
        })
    }

    /// Expand every pattern and subscribe to each containing directory once.
    ///
    /// An invalid pattern aborts setup. A directory the watcher refuses is
    /// reported and still counted as registered.
    pub fn setup(&mut self) -> Result<()> {
        let reporter = Arc::clone(self.executor.reporter());

        for pattern in self.patterns.iter() {
            for dir in pattern.matching_dirs()? {
                if self.registry.contains(&dir) {
                    continue;
                }

                reporter.report(
                    Severity::Notice,
                    &format!("Watching file on {}", dir.display()),
                );
                if let Err(err) = self.watcher.watch_dir(&dir) {
                    warn!(dir = %dir.display(), error = %err, "failed to watch directory");
                    reporter.report(Severity::Error, &err.to_string());
                }
                self.registry.insert(dir);
            }
        }

        info!(dirs = self.registry.len(), "watch setup complete");
        Ok(())
    }

    /// Directories subscribed so far.
    pub fn registry(&self) -> &BTreeSet<PathBuf> {
        &self.registry
    }

    pub fn patterns(&self) -> &[WatchPattern] {
        &self.patterns
    }

    /// Targets of every binding whose pattern matches `path`, in pattern
    /// order.
    pub fn matching_targets(&self, path: &Path) -> Vec<Invocation> {
        self.patterns
            .iter()
            .filter(|p| p.matches(&self.options.root, path))
            .map(|p| p.target().clone())
            .collect()
    }

    /// Trigger every task bound to a pattern matching `path`.
    pub fn dispatch_path(&self, path: &Path) -> Vec<Invocation> {
        self.dispatch_paths(&[path])
    }

    /// Trigger every task bound to a pattern matching any of `paths`, as one
    /// event.
    ///
    /// Tasks are spawned, not awaited. The screen is cleared once before
    /// the first trigger unless `keep_log` is set. Returns what was
    /// triggered.
    pub fn dispatch_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Invocation> {
        let targets: Vec<(&Path, Invocation)> = paths
            .iter()
            .flat_map(|path| {
                let path = path.as_ref();
                self.matching_targets(path)
                    .into_iter()
                    .map(move |target| (path, target))
            })
            .collect();

        if targets.is_empty() {
            return Vec::new();
        }

        if !self.options.keep_log {
            self.executor.reporter().clear_screen();
        }

        targets
            .into_iter()
            .map(|(path, target)| {
                info!(path = %path.display(), task = %target, "watch match -> triggering task");
                self.executor.spawn_task(target.clone());
                target
            })
            .collect()
    }

    /// Handle one item from the watcher's stream.
    pub fn handle_event(&self, res: notify::Result<Event>) {
        match res {
            Ok(event) => {
                if !is_write_event(&event.kind) {
                    return;
                }
                debug!(?event, "received write event");
                self.dispatch_paths(&event.paths);
            }
            Err(err) => {
                warn!(error = %err, "file watch error");
                self.executor
                    .reporter()
                    .report(Severity::Error, &err.to_string());
            }
        }
    }
}

impl<W: DirectoryWatcher + 'static> WatchDispatcher<W> {
    /// Service `events` on a background Tokio task until the stream ends.
    pub fn spawn(self, mut events: EventReceiver) -> WatchHandle {
        let task = tokio::spawn(async move {
            info!("watch loop started");
            while let Some(res) = events.recv().await {
                self.handle_event(res);
            }
            debug!("watch loop finished");
        });
        WatchHandle { task }
    }
}

/// Handle for the running watch loop.
///
/// The loop owns the filesystem watcher. Dropping this handle stops file
/// watching.
#[derive(Debug)]
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
