// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BuildError, Result};
use crate::graph::reference::{parse_command, parse_invocation};
use crate::types::CommandSpec;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = BuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_targets(cfg)?;
    validate_task_references(cfg)?;
    Ok(())
}

fn validate_watch_targets(cfg: &RawConfigFile) -> Result<()> {
    for (pattern, target) in cfg.watch.iter() {
        if parse_invocation(target).is_none() {
            return Err(BuildError::ConfigError(format!(
                "watch pattern '{}' must be bound to a task reference like ${{task}} or #${{task}}, got '{}'",
                pattern, target
            )));
        }
    }
    Ok(())
}

/// Reject tasks that reach themselves through `${task}` commands.
///
/// Such a task would re-enter itself forever. Whether a referenced task
/// exists is not checked here; an unknown name fails when it is run.
fn validate_task_references(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: caller -> callee. For
    //   build: ["${clean}", "make"]
    // we add edge build -> clean.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, commands) in cfg.task.iter() {
        for command in commands.iter() {
            if let CommandSpec::Task(invocation) = parse_command(command) {
                if let Some((callee, _)) = cfg.task.get_key_value(&invocation.name) {
                    graph.add_edge(name.as_str(), callee.as_str(), ());
                }
            }
        }
    }

    // A topological sort will fail if there is a cycle (self-loops included).
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BuildError::TaskCycle(format!(
            "task '{}' invokes itself through task references",
            cycle.node_id()
        ))),
    }
}
