// tests/cli_exit_status.rs
#![cfg(unix)]

mod common;
use crate::common::config_file;

use std::path::Path;
use std::process::{Command, Output};

fn buildwatch(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_buildwatch"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("BUILDWATCH_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("spawn buildwatch")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn default_task_runs_and_exits_zero() {
    let cfg = config_file("task:\n  default:\n    - echo hi\n", "yml");

    let output = buildwatch(cfg.path(), &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("LOG: hi"), "{out}");
    assert!(out.contains("default [0]"), "{out}");
}

#[test]
fn silent_hides_progress_lines() {
    let cfg = config_file("task:\n  default:\n    - echo hi\n", "yml");

    let output = buildwatch(cfg.path(), &["--silent"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("LOG: hi"), "{out}");
    assert!(!out.contains("RUN:"), "{out}");
}

#[test]
fn named_task_is_selected_by_argument() {
    let cfg = config_file(
        "task:\n  default:\n    - echo wrong\n  release:\n    - echo right\n",
        "yml",
    );

    let output = buildwatch(cfg.path(), &["release"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("right"), "{out}");
    assert!(!out.contains("wrong"), "{out}");
}

#[test]
fn unknown_task_exits_non_zero_without_running_anything() {
    let cfg = config_file("task:\n  default:\n    - echo should-not-run\n", "yml");

    let output = buildwatch(cfg.path(), &["deploy"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Task \"deploy\" Not Found"), "{out}");
    assert!(!out.contains("should-not-run"), "{out}");
}

#[test]
fn failing_command_ends_the_task_but_not_the_process() {
    let cfg = config_file(
        "task:\n  default:\n    - echo first\n    - \"false\"\n    - echo third\n",
        "yml",
    );

    let output = buildwatch(cfg.path(), &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("first"), "{out}");
    assert!(out.contains("default [1] TERMINATED"), "{out}");
    assert!(!out.contains("third"), "{out}");
}

#[test]
fn missing_variable_exits_non_zero() {
    let cfg = config_file("task:\n  default:\n    - echo ${nope}\n", "yml");

    let output = buildwatch(cfg.path(), &[]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Variable \"nope\" Not Found"));
}

#[test]
fn invalid_watch_target_exits_non_zero() {
    let cfg = config_file(
        "task:\n  default:\n    - echo hi\nwatch:\n  src/*.c: make\n",
        "yml",
    );

    let output = buildwatch(cfg.path(), &[]);

    assert!(!output.status.success());
    assert!(!stdout(&output).contains("LOG: hi"));
}

#[test]
fn missing_config_file_exits_non_zero() {
    let output = buildwatch(Path::new("/definitely/not/here/build.yml"), &[]);
    assert!(!output.status.success());
}

#[test]
fn toml_config_is_accepted() {
    let cfg = config_file(
        "[variable]\nname = \"toml\"\n\n[task]\ndefault = [\"echo from-${name}\"]\n",
        "toml",
    );

    let output = buildwatch(cfg.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("from-toml"));
}

#[test]
fn dry_run_prints_the_resolved_graph_without_running() {
    let cfg = config_file(
        "variable:\n  out: build\ntask:\n  default:\n    - touch ${out}/marker\n    - \"#${serve}\"\n  serve:\n    - ./server\n",
        "yml",
    );

    let output = buildwatch(cfg.path(), &["--dry-run"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("out = build"), "{out}");
    assert!(out.contains("[0] touch ${out}/marker"), "{out}");
    assert!(out.contains("[1] -> task serve (detached)"), "{out}");
    assert!(!Path::new("build/marker").exists());
}
