// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from disk, before validation.
///
/// ```yaml
/// variable:
///   src: src
///   out: build
/// task:
///   default:
///     - mkdir -p ${out}
///     - ${compile}
///     - "#${serve}"
///   compile:
///     - cc ${src}/main.c -o ${out}/main
///   serve:
///     - ./${out}/main
/// watch:
///   ${src}/*.c: ${compile}
/// ```
///
/// All sections are optional. Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Variables usable as `${name}` in other variables, commands and
    /// watch patterns.
    #[serde(default)]
    pub variable: BTreeMap<String, String>,

    /// Task name → ordered command list.
    #[serde(default)]
    pub task: BTreeMap<String, Vec<String>>,

    /// Glob pattern → `${task}` or `#${task}`.
    #[serde(default)]
    pub watch: BTreeMap<String, String>,
}

/// A configuration that has passed validation.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)` (see
/// `validate.rs`) or the loader.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    variable: BTreeMap<String, String>,
    task: BTreeMap<String, Vec<String>>,
    watch: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            variable: raw.variable,
            task: raw.task,
            watch: raw.watch,
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variable
    }

    pub fn tasks(&self) -> &BTreeMap<String, Vec<String>> {
        &self.task
    }

    pub fn watches(&self) -> &BTreeMap<String, String> {
        &self.watch
    }

    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<String, String>,
        BTreeMap<String, Vec<String>>,
        BTreeMap<String, String>,
    ) {
        (self.variable, self.task, self.watch)
    }
}
