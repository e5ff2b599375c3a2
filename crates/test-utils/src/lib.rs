pub mod builders;
pub mod fake_backend;
pub mod recorders;

use std::sync::{Arc, Once};

use tracing_subscriber::{fmt, EnvFilter};

use buildwatch::console::Reporter;
use buildwatch::engine::{FatalReceiver, TaskExecutor};
use buildwatch::graph::TaskGraph;

use crate::fake_backend::FakeBackend;
use crate::recorders::RecordingReporter;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Executor wired to a fake backend and a recording reporter.
pub struct TestHarness {
    pub executor: TaskExecutor,
    pub fatal_rx: FatalReceiver,
    pub backend: FakeBackend,
    pub reporter: Arc<RecordingReporter>,
}

impl TestHarness {
    pub fn new(graph: Arc<TaskGraph>) -> Self {
        Self::with_backend(graph, FakeBackend::new())
    }

    pub fn with_backend(graph: Arc<TaskGraph>, backend: FakeBackend) -> Self {
        let reporter = RecordingReporter::new();
        let dyn_reporter: Arc<dyn Reporter> = reporter.clone();
        let (executor, fatal_rx) =
            TaskExecutor::new(graph, Arc::new(backend.clone()), dyn_reporter);
        Self {
            executor,
            fatal_rx,
            backend,
            reporter,
        }
    }
}
