// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes so it can be fed to a glob matcher.
pub fn slash_str(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    match s.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => s,
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root stays at the root; leading `..` of a relative
/// path are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Join `pattern` onto `root` and normalize, escaping the part of the result
/// that still comes from `root` with `escape`.
///
/// The root may contain glob metacharacters (`[`, `*`, ...) that must be
/// matched literally; the pattern's own components are kept as written.
pub fn anchor_pattern(root: &Path, pattern: &str, escape: fn(&str) -> String) -> String {
    let joined = normalize_lexically(&root.join(pattern));
    let shared = joined
        .components()
        .zip(root.components())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = String::new();
    for (i, component) in joined.components().enumerate() {
        let part = component.as_os_str().to_string_lossy();
        match component {
            Component::RootDir => out.push('/'),
            _ => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                if i < shared {
                    out.push_str(&escape(&part));
                } else {
                    out.push_str(&part);
                }
            }
        }
    }
    out.replace('\\', "/")
}

/// Directory that should be watched for a matched file.
///
/// A bare file name lives in the current directory.
pub fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
