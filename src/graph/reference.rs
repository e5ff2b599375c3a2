// src/graph/reference.rs

//! `${name}` reference syntax.
//!
//! The same token shape serves two purposes:
//! - inside arbitrary text it is a variable reference and is substituted;
//! - when it makes up a whole command (optionally behind a `#`) it names
//!   another task to invoke.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{BuildError, Result};
use crate::types::{CommandSpec, Invocation};

/// Any `${identifier}` occurrence inside a larger string.
static REFERENCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{[A-Za-z0-9_-]+\}").expect("reference token regex is valid")
});

/// Prefix marking a command or task reference as detached.
pub const DETACHED_PREFIX: char = '#';

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// If `token` is exactly `${identifier}`, return the identifier.
///
/// The token must span the whole string: `echo ${a}` or `${a}${b}` are not
/// references.
pub fn reference_name(token: &str) -> Option<&str> {
    let inner = token.strip_prefix("${")?.strip_suffix('}')?;
    if !inner.is_empty() && inner.bytes().all(is_identifier_byte) {
        Some(inner)
    } else {
        None
    }
}

/// Parse a task reference of the form `${task}` or `#${task}`.
pub fn parse_invocation(raw: &str) -> Option<Invocation> {
    let (detached, body) = split_detached(raw);
    reference_name(body).map(|name| Invocation {
        name: name.to_string(),
        detached,
    })
}

/// Classify one entry of a task's command list.
pub fn parse_command(raw: &str) -> CommandSpec {
    let (detached, body) = split_detached(raw);
    match reference_name(body) {
        Some(name) => CommandSpec::Task(Invocation {
            name: name.to_string(),
            detached,
        }),
        None => CommandSpec::Literal {
            text: body.to_string(),
            detached,
        },
    }
}

fn split_detached(raw: &str) -> (bool, &str) {
    match raw.strip_prefix(DETACHED_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, raw),
    }
}

/// Names of every `${identifier}` token in `text`, left to right.
pub fn referenced_names(text: &str) -> impl Iterator<Item = &str> {
    REFERENCE_TOKEN.find_iter(text).map(|m| {
        let token = m.as_str();
        &token[2..token.len() - 1]
    })
}

/// True if `text` contains at least one `${identifier}` token.
pub fn contains_reference(text: &str) -> bool {
    REFERENCE_TOKEN.is_match(text)
}

/// Replace every `${identifier}` in `text` with its value from `variables`.
///
/// Matches are replaced left to right, each exactly once. Substituted values
/// are not scanned again. A reference to a name missing from `variables` is
/// an error; there is no empty default.
pub fn substitute_all(text: &str, variables: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in REFERENCE_TOKEN.find_iter(text) {
        let token = m.as_str();
        let name = &token[2..token.len() - 1];
        let value = variables
            .get(name)
            .ok_or_else(|| BuildError::VariableNotFound(name.to_string()))?;

        out.push_str(&text[last..m.start()]);
        out.push_str(value);
        last = m.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}
