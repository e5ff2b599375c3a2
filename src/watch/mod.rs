// src/watch/mod.rs

//! File watching and task retriggering.
//!
//! This module is responsible for:
//! - Resolving and compiling the `watch` glob patterns (`patterns.rs`).
//! - Subscribing to the directories that hold matching files through a
//!   cross-platform filesystem watcher (`notify`, see `watcher.rs`).
//! - Turning write events into fire-and-forget task runs
//!   (`dispatcher.rs`).

pub mod dispatcher;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use dispatcher::{DispatchOptions, WatchDispatcher, WatchHandle};
pub use patterns::{compile_patterns, WatchPattern};
pub use watcher::{is_write_event, DirectoryWatcher, EventReceiver, NotifyWatcher};
