// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running shell commands, using
//! `tokio::process::Command`, and forwarding their output to the console.
//!
//! - [`command`] launches a command through the host shell, streams its
//!   stdout/stderr, and either waits for it or leaves it running.
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `ShellBackend` used in production, which tests can replace with a fake.

pub mod backend;
pub mod command;

pub use backend::{ProcessBackend, ShellBackend};
pub use command::{run_shell, shell_command};
