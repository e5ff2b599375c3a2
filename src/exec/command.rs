// src/exec/command.rs

//! Shell process launching and output streaming.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::console::{Reporter, Severity};
use crate::types::CommandOutcome;

/// How long a finished blocking command's output may keep draining.
///
/// Background children started by the shell (`server &`) inherit the pipes
/// and hold them open; their streams are left running past this point.
const STREAM_GRACE: Duration = Duration::from_millis(250);

/// Build a shell command appropriate for the platform.
pub fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    }
}

/// Run `command` through the host shell.
///
/// stdout and stderr are forwarded line by line to `reporter` (as plain and
/// error lines) for as long as the process writes to them, in both modes.
///
/// - Blocking: waits for the exit status. A launch failure or non-zero exit
///   is `Failed`.
/// - Detached: returns `Detached` right after spawning. The process is
///   reaped in the background and its status is dropped; launch failures are
///   only traced.
pub async fn run_shell(
    command: &str,
    detached: bool,
    reporter: Arc<dyn Reporter>,
) -> CommandOutcome {
    debug!(cmd = %command, detached, "launching shell command");

    let (mut child, streams) = match spawn_streaming(command, &reporter) {
        Ok(spawned) => spawned,
        Err(err) => {
            if detached {
                debug!(cmd = %command, error = %err, "detached command failed to launch");
                return CommandOutcome::Detached;
            }
            warn!(cmd = %command, error = %err, "command failed to launch");
            reporter.report(Severity::Error, &format!("{err:#}"));
            return CommandOutcome::Failed(-1);
        }
    };

    if detached {
        let command = command.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(cmd = %command, %status, "detached command exited"),
                Err(err) => debug!(cmd = %command, error = %err, "waiting for detached command"),
            }
        });
        return CommandOutcome::Detached;
    }

    let status = child.wait().await;

    // Drain the remaining output before reporting the outcome so the
    // progress line comes after the command's own lines.
    let deadline = Instant::now() + STREAM_GRACE;
    for stream in streams {
        if timeout_at(deadline, stream).await.is_err() {
            debug!(cmd = %command, "output still open after exit; leaving it streaming");
        }
    }

    match status {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            info!(
                cmd = %command,
                exit_code = code,
                success = status.success(),
                "command exited"
            );
            if status.success() {
                CommandOutcome::Success
            } else {
                CommandOutcome::Failed(code)
            }
        }
        Err(err) => {
            warn!(cmd = %command, error = %err, "waiting for command failed");
            reporter.report(Severity::Error, &err.to_string());
            CommandOutcome::Failed(-1)
        }
    }
}

fn spawn_streaming(
    command: &str,
    reporter: &Arc<dyn Reporter>,
) -> Result<(Child, Vec<JoinHandle<()>>)> {
    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning shell for `{command}`"))?;

    let mut streams = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        streams.push(forward_lines(stdout, Severity::Plain, Arc::clone(reporter)));
    }
    if let Some(stderr) = child.stderr.take() {
        streams.push(forward_lines(stderr, Severity::Error, Arc::clone(reporter)));
    }

    Ok((child, streams))
}

/// Forward each line of `reader` to `reporter` until EOF.
fn forward_lines<R>(reader: R, severity: Severity, reporter: Arc<dyn Reporter>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => reporter.report(severity, &line),
                Ok(None) => break,
                Err(err) => {
                    debug!(error = %err, "stopped reading process output");
                    break;
                }
            }
        }
    })
}
