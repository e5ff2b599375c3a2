// tests/command_runner.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, with_timeout, RecordingReporter};

use std::sync::Arc;
use std::time::{Duration, Instant};

use buildwatch::console::{Reporter, Severity};
use buildwatch::exec::{ProcessBackend, ShellBackend, run_shell};
use buildwatch::types::CommandOutcome;

fn reporter() -> (Arc<RecordingReporter>, Arc<dyn Reporter>) {
    let recording = RecordingReporter::new();
    let dynamic: Arc<dyn Reporter> = recording.clone();
    (recording, dynamic)
}

#[tokio::test]
async fn blocking_command_streams_stdout_lines() {
    init_tracing();
    let (recording, dynamic) = reporter();

    let outcome = run_shell("echo hello; echo world", false, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(recording.messages(Severity::Plain), vec!["hello", "world"]);
    assert!(recording.messages(Severity::Error).is_empty());
}

#[tokio::test]
async fn stderr_is_reported_as_error_lines() {
    let (recording, dynamic) = reporter();

    let outcome = run_shell("echo oops 1>&2", false, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(recording.messages(Severity::Error), vec!["oops"]);
}

#[tokio::test]
async fn non_zero_exit_is_a_failure_with_its_code() {
    let (_recording, dynamic) = reporter();

    let outcome = run_shell("exit 3", false, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Failed(3));
}

#[tokio::test]
async fn unknown_program_fails_through_the_shell() {
    let (recording, dynamic) = reporter();

    let outcome = run_shell("definitely-not-a-real-program-xyz", false, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Failed(127));
    assert!(!recording.messages(Severity::Error).is_empty());
}

#[tokio::test]
async fn detached_command_returns_immediately() {
    let (recording, dynamic) = reporter();

    let started = Instant::now();
    let outcome = run_shell("sleep 2; echo late", true, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Detached);
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(recording.messages(Severity::Plain).is_empty());
}

#[tokio::test]
async fn detached_command_output_is_still_streamed() {
    let (recording, dynamic) = reporter();

    let outcome = run_shell("echo from-background", true, dynamic).await;
    assert_eq!(outcome, CommandOutcome::Detached);

    with_timeout(async {
        while recording.messages(Severity::Plain).is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;

    assert_eq!(recording.messages(Severity::Plain), vec!["from-background"]);
}

#[tokio::test]
async fn shell_backend_runs_through_the_trait() {
    let (recording, dynamic) = reporter();
    let backend = ShellBackend::new(dynamic);

    let outcome = backend.launch("printf 'a\\nb\\n'".to_string(), false).await;

    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(recording.messages(Severity::Plain), vec!["a", "b"]);
}

#[tokio::test]
async fn blocking_command_returns_when_the_shell_exits() {
    let (recording, dynamic) = reporter();

    // The background `sleep` inherits stdout and keeps it open.
    let started = Instant::now();
    let outcome = run_shell("sleep 4 & echo started", false, dynamic).await;

    assert_eq!(outcome, CommandOutcome::Success);
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "took {:?}",
        started.elapsed()
    );

    with_timeout(async {
        while recording.messages(Severity::Plain).is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert_eq!(recording.messages(Severity::Plain), vec!["started"]);
}
