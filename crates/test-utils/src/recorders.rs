use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use buildwatch::console::{Reporter, Severity};
use buildwatch::errors::Result;
use buildwatch::watch::DirectoryWatcher;

/// A reporter that keeps every console line in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Severity, String)>>,
    clears: AtomicUsize,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Messages of the given severity, in order.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }

    fn clear_screen(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

/// A directory watcher that only remembers which directories it was asked
/// to watch.
#[derive(Debug, Clone, Default)]
pub struct RecordingWatcher {
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watched(&self) -> Vec<PathBuf> {
        self.dirs.lock().unwrap().clone()
    }
}

impl DirectoryWatcher for RecordingWatcher {
    fn watch_dir(&mut self, dir: &Path) -> Result<()> {
        self.dirs.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}
