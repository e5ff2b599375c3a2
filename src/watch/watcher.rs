// src/watch/watcher.rs

use std::path::Path;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::errors::Result;

/// Events and errors coming out of the filesystem watcher.
pub type EventReceiver = mpsc::UnboundedReceiver<notify::Result<Event>>;

/// Directory-level subscription to filesystem events.
///
/// Production code uses [`NotifyWatcher`]; tests can record the requested
/// directories instead.
pub trait DirectoryWatcher: Send {
    /// Start receiving events for files directly inside `dir`.
    fn watch_dir(&mut self, dir: &Path) -> Result<()>;
}

/// Cross-platform watcher backed by `notify`.
///
/// Events are delivered on the [`EventReceiver`] returned by [`new`]
/// for as long as this value is alive.
///
/// [`new`]: NotifyWatcher::new
pub struct NotifyWatcher {
    inner: RecommendedWatcher,
}

impl std::fmt::Debug for NotifyWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyWatcher").finish()
    }
}

impl NotifyWatcher {
    pub fn new() -> Result<(Self, EventReceiver)> {
        // Channel from the blocking notify callback into the async world.
        let (event_tx, event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

        let inner = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Err(err) = event_tx.send(res) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("buildwatch: failed to forward notify event: {err}");
                }
            },
            Config::default(),
        )?;

        Ok((Self { inner }, event_rx))
    }
}

impl DirectoryWatcher for NotifyWatcher {
    fn watch_dir(&mut self, dir: &Path) -> Result<()> {
        self.inner.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(())
    }
}

/// Only content writes retrigger tasks; creates, removes, renames and
/// metadata changes are ignored.
pub fn is_write_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}
