// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use crate::errors::{BuildError, Result};
use crate::graph::{TaskGraph, WatchBinding};
use crate::types::Invocation;
use crate::watch::path_utils::{anchor_pattern, containing_dir, normalize_lexically, slash_str};

/// A compiled watch binding: resolved glob pattern plus the task it
/// triggers.
///
/// Relative patterns are anchored on the project root (so `../shared/*.txt`
/// works) and every match is done on absolute, lexically normalized paths.
/// `*` and `?` stop at `/`, so `src/*.txt` does not match
/// `src/nested/a.txt`. Brace alternates (`{a,b}`) are rejected because
/// on-disk expansion cannot honor them.
#[derive(Clone)]
pub struct WatchPattern {
    pattern: String,
    anchored: String,
    matcher: GlobMatcher,
    target: Invocation,
}

impl fmt::Debug for WatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchPattern")
            .field("pattern", &self.pattern)
            .field("anchored", &self.anchored)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl WatchPattern {
    /// Resolve variables in the binding's pattern, anchor it on `root` and
    /// compile it.
    pub fn compile(binding: &WatchBinding, graph: &TaskGraph, root: &Path) -> Result<Self> {
        let pattern = graph.resolve(&binding.pattern)?;

        if let Some(pos) = pattern.find(['{', '}']) {
            return Err(BuildError::InvalidPattern {
                pattern,
                source: glob::PatternError {
                    pos,
                    msg: "brace alternates are not supported",
                },
            });
        }

        let anchored = anchor_pattern(root, &pattern, glob::Pattern::escape);
        let matcher = GlobBuilder::new(&anchor_pattern(root, &pattern, globset::escape))
            .literal_separator(true)
            .build()
            .map_err(|source| BuildError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            pattern,
            anchored,
            matcher,
            target: binding.target.clone(),
        })
    }

    /// The pattern with variables substituted.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn target(&self) -> &Invocation {
        &self.target
    }

    /// Returns true if a write to `path` should trigger this binding.
    ///
    /// Relative event paths are taken relative to `root`.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        let abs = normalize_lexically(&root.join(path));
        self.matcher.is_match(slash_str(&abs))
    }

    /// Expand the pattern against the filesystem and return the containing
    /// directory of every match, in match order (duplicates included).
    ///
    /// A syntactically invalid pattern is an error. Entries that cannot be
    /// read are skipped with a warning.
    pub fn matching_dirs(&self) -> Result<Vec<PathBuf>> {
        let entries = glob::glob(&self.anchored).map_err(|source| BuildError::InvalidPattern {
            pattern: self.pattern.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => dirs.push(containing_dir(&path)),
                Err(err) => warn!(pattern = %self.pattern, error = %err, "glob error"),
            }
        }
        Ok(dirs)
    }
}

/// Compile every watch binding of the graph against `root`, in pattern
/// order.
pub fn compile_patterns(graph: &TaskGraph, root: &Path) -> Result<Vec<WatchPattern>> {
    graph
        .watches()
        .iter()
        .map(|binding| WatchPattern::compile(binding, graph, root))
        .collect()
}
