// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant here is fatal: it means the task graph is malformed (or the
//! environment is unusable) and the process should stop. Ordinary command
//! failures are not errors at this level; they are reported as
//! [`CommandOutcome::Failed`](crate::types::CommandOutcome) and only end the
//! task that ran them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Variable \"{0}\" Not Found")]
    VariableNotFound(String),

    #[error("Variable \"{name}\" references itself through other variables: {value}")]
    UnresolvedVariable { name: String, value: String },

    #[error("Task \"{0}\" Not Found")]
    TaskNotFound(String),

    #[error("Invalid watch pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Invalid watch glob \"{pattern}\": {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Task reference cycle: {0}")]
    TaskCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildError>;
