// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `buildwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildwatch",
    version,
    about = "A simple automation task runner that reruns tasks on file writes.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run. Prefix with `#` to run it detached.
    #[arg(value_name = "TASK", default_value = "default")]
    pub task: String,

    /// Path to the config file (YAML, or TOML with a `.toml` extension).
    #[arg(short, long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Hide `RUN:` progress lines while tasks run.
    #[arg(short, long)]
    pub silent: bool,

    /// Keep previous output when a watched file changes instead of clearing
    /// the screen.
    #[arg(short, long)]
    pub keep: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and resolve the config, print it, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
