// src/config/mod.rs

//! Configuration loading and validation for buildwatch.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a config file from disk as YAML or TOML (`loader.rs`).
//! - Validate watch targets and task reference cycles (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, ConfigFormat};
pub use model::{ConfigFile, RawConfigFile};
