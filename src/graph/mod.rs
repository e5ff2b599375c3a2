// src/graph/mod.rs

//! The resolved, immutable task graph.
//!
//! - [`reference`] implements the `${name}` syntax (substitution and
//!   whole-string task references).
//! - [`variables`] holds the pre-resolved variable table.
//!
//! A [`TaskGraph`] is built once from a validated [`ConfigFile`] and shared
//! read-only (behind an `Arc`) by the executor and the watch dispatcher.

pub mod reference;
pub mod variables;

use std::collections::BTreeMap;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::types::{CommandSpec, Invocation, TaskName};

pub use reference::{parse_command, parse_invocation, reference_name, substitute_all};
pub use variables::VariableTable;

/// One `pattern → task reference` entry from the `watch` section.
///
/// `pattern` is kept as written; variables in it are resolved by the watch
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchBinding {
    pub pattern: String,
    pub target: Invocation,
}

#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    variables: VariableTable,
    tasks: BTreeMap<TaskName, Vec<CommandSpec>>,
    watches: Vec<WatchBinding>,
}

impl TaskGraph {
    /// Pre-resolve variables and parse every command and watch target.
    ///
    /// Fails if a variable references a missing or unresolvable name.
    pub fn from_config(cfg: ConfigFile) -> Result<Self> {
        let (variable, task, watch) = cfg.into_parts();

        let variables = VariableTable::resolve(variable)?;

        let tasks = task
            .into_iter()
            .map(|(name, commands)| {
                let parsed = commands.iter().map(|c| parse_command(c)).collect();
                (name, parsed)
            })
            .collect();

        // Targets are checked in `config::validate`.
        let watches = watch
            .into_iter()
            .filter_map(|(pattern, target)| {
                parse_invocation(&target).map(|target| WatchBinding { pattern, target })
            })
            .collect();

        Ok(Self {
            variables,
            tasks,
            watches,
        })
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Commands of the named task, if it exists.
    pub fn task(&self, name: &str) -> Option<&[CommandSpec]> {
        self.tasks.get(name).map(Vec::as_slice)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn watches(&self) -> &[WatchBinding] {
        &self.watches
    }

    pub fn has_watches(&self) -> bool {
        !self.watches.is_empty()
    }

    /// Substitute resolved variables into `text`.
    pub fn resolve(&self, text: &str) -> Result<String> {
        self.variables.substitute(text)
    }
}
