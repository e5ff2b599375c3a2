#![allow(dead_code)]

use std::sync::Arc;

use buildwatch::config::{ConfigFile, RawConfigFile};
use buildwatch::graph::TaskGraph;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.config
            .variable
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_task(mut self, name: &str, commands: &[&str]) -> Self {
        self.config.task.insert(
            name.to_string(),
            commands.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_watch(mut self, pattern: &str, target: &str) -> Self {
        self.config
            .watch
            .insert(pattern.to_string(), target.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Build and pre-resolve straight into a shared `TaskGraph`.
    pub fn build_graph(self) -> Arc<TaskGraph> {
        let graph = TaskGraph::from_config(self.build()).expect("Failed to resolve task graph");
        Arc::new(graph)
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
