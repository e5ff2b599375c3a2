// src/graph/variables.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{BuildError, Result};
use crate::graph::reference::{referenced_names, substitute_all};

/// Variable name → fully resolved value.
///
/// Construct with [`VariableTable::resolve`]; afterwards no value contains a
/// `${...}` token, so substituting into commands is a single lookup per
/// token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    values: BTreeMap<String, String>,
}

impl VariableTable {
    /// Pre-resolve raw variable definitions.
    ///
    /// Each variable is rewritten exactly once, after every variable it
    /// references, so any acyclic table resolves completely regardless of
    /// name order. A variable that reaches itself through references is
    /// rejected with [`BuildError::UnresolvedVariable`]; a reference to an
    /// undefined name with [`BuildError::VariableNotFound`].
    pub fn resolve(raw: BTreeMap<String, String>) -> Result<Self> {
        let order = resolution_order(&raw)?;

        let mut values = raw.clone();
        for name in order {
            let resolved = substitute_all(&values[name], &values)?;
            debug!(variable = %name, value = %resolved, "resolved variable");
            values.insert(name.to_string(), resolved);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute every `${name}` in `text` with its resolved value.
    pub fn substitute(&self, text: &str) -> Result<String> {
        substitute_all(text, &self.values)
    }
}

/// Variables ordered so each comes after everything it references.
fn resolution_order(raw: &BTreeMap<String, String>) -> Result<Vec<&str>> {
    // Edge direction: dependency -> dependent. For
    //   bin: "${out}/app"
    // we add edge out -> bin.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in raw.keys() {
        graph.add_node(name.as_str());
    }

    for (name, value) in raw.iter() {
        for referenced in referenced_names(value) {
            // Undefined names surface from `substitute_all` with their own error.
            if let Some((dependency, _)) = raw.get_key_value(referenced) {
                graph.add_edge(dependency.as_str(), name.as_str(), ());
            }
        }
    }

    toposort(&graph, None).map_err(|cycle| {
        let name = cycle.node_id();
        BuildError::UnresolvedVariable {
            name: name.to_string(),
            value: raw[name].clone(),
        }
    })
}
