// src/engine/mod.rs

//! Task execution engine.
//!
//! [`TaskExecutor`] walks a task's command list, decides blocking versus
//! detached mode per command, delegates task references back to itself and
//! hands literal commands to a [`ProcessBackend`](crate::exec::ProcessBackend).
//!
//! Detached mode, per command:
//!
//! | task run detached (`#task` / forced) | command has `#` | command runs |
//! |---------------------------------------|-----------------|--------------|
//! | no                                    | no              | blocking     |
//! | no                                    | yes             | detached     |
//! | yes                                   | either          | detached     |
//!
//! A detached task reference runs the referenced task with every command
//! detached, so the caller only waits for the launches. Watch-triggered runs
//! go through [`TaskExecutor::spawn_task`] and are never awaited at all.

pub mod executor;

pub use executor::{FatalReceiver, TaskExecutor};
