// tests/config_loading.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::config_file;

use std::error::Error;
use std::path::Path;

use buildwatch::config::{
    default_config_path, load_and_validate, load_from_path, ConfigFile, ConfigFormat,
};
use buildwatch::errors::BuildError;
use buildwatch::graph::TaskGraph;
use buildwatch::types::{CommandSpec, Invocation};

type TestResult = Result<(), Box<dyn Error>>;

const YAML_CONFIG: &str = r##"
variable:
  src: src
  out: build
task:
  default:
    - mkdir -p ${out}
    - ${compile}
    - "#${serve}"
  compile:
    - cc ${src}/main.c -o ${out}/main
  serve:
    - ./${out}/main
watch:
  ${src}/*.c: ${compile}
"##;

#[test]
fn loads_yaml_sections() -> TestResult {
    let file = config_file(YAML_CONFIG, "yml");

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.variables().get("out").map(String::as_str), Some("build"));
    assert_eq!(cfg.tasks().len(), 3);
    assert_eq!(
        cfg.tasks()["default"],
        vec!["mkdir -p ${out}", "${compile}", "#${serve}"]
    );
    assert_eq!(
        cfg.watches().get("${src}/*.c").map(String::as_str),
        Some("${compile}")
    );
    Ok(())
}

#[test]
fn yaml_config_builds_a_resolved_graph() -> TestResult {
    let file = config_file(YAML_CONFIG, "yaml");

    let graph = TaskGraph::from_config(load_and_validate(file.path())?)?;

    let default = graph.task("default").expect("default task");
    assert_eq!(
        default[1],
        CommandSpec::Task(Invocation::blocking("compile"))
    );
    assert_eq!(default[2], CommandSpec::Task(Invocation::detached("serve")));
    assert_eq!(graph.watches()[0].target, Invocation::blocking("compile"));
    assert_eq!(
        graph.resolve("cc ${src}/main.c -o ${out}/main")?,
        "cc src/main.c -o build/main"
    );
    Ok(())
}

#[test]
fn loads_toml_by_extension() -> TestResult {
    let file = config_file(
        r##"
[variable]
out = "target"

[task]
default = ["cargo build --target-dir ${out}", "#${docs}"]
docs = ["mdbook serve"]

[watch]
"src/*.rs" = "${default}"
"##,
        "toml",
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.tasks()["docs"], vec!["mdbook serve"]);
    assert_eq!(
        cfg.watches().get("src/*.rs").map(String::as_str),
        Some("${default}")
    );
    Ok(())
}

#[test]
fn missing_sections_default_to_empty() -> TestResult {
    let file = config_file("task:\n  default:\n    - echo hi\n", "yml");

    let cfg = load_and_validate(file.path())?;

    assert!(cfg.variables().is_empty());
    assert!(cfg.watches().is_empty());
    assert_eq!(cfg.tasks()["default"], vec!["echo hi"]);
    Ok(())
}

#[test]
fn empty_file_is_an_empty_config() -> TestResult {
    let file = config_file("  \n", "yml");

    let raw = load_from_path(file.path())?;

    assert!(raw.variable.is_empty());
    assert!(raw.task.is_empty());
    assert!(raw.watch.is_empty());
    Ok(())
}

#[test]
fn unknown_top_level_keys_are_ignored() -> TestResult {
    let file = config_file(
        "version: 2\ntask:\n  default:\n    - echo hi\n",
        "yml",
    );

    let cfg = load_and_validate(file.path())?;
    assert_eq!(cfg.tasks().len(), 1);
    Ok(())
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let file = config_file("task: [unclosed\n", "yml");

    let err = load_from_path(file.path()).unwrap_err();
    assert!(matches!(err, BuildError::YamlError(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = config_file("[task\ndefault = 1\n", "toml");

    let err = load_from_path(file.path()).unwrap_err();
    assert!(matches!(err, BuildError::TomlError(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_from_path("/definitely/not/here/build.yml").unwrap_err();
    assert!(matches!(err, BuildError::IoError(_)));
}

#[test]
fn watch_target_must_be_a_task_reference() {
    for target in ["make", "echo ${build}", "${build} now", "##${build}"] {
        let raw = ConfigFileBuilder::new()
            .with_task("build", &["make"])
            .with_watch("src/*.c", target)
            .raw();

        match ConfigFile::try_from(raw) {
            Err(BuildError::ConfigError(msg)) => assert!(msg.contains("src/*.c"), "{msg}"),
            other => panic!("expected ConfigError for {target:?}, got {other:?}"),
        }
    }
}

#[test]
fn detached_watch_target_is_accepted() {
    let raw = ConfigFileBuilder::new()
        .with_task("serve", &["./server"])
        .with_watch("public/*.html", "#${serve}")
        .raw();

    assert!(ConfigFile::try_from(raw).is_ok());
}

#[test]
fn task_reference_cycle_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task("a", &["echo a", "${b}"])
        .with_task("b", &["#${c}"])
        .with_task("c", &["${a}"])
        .raw();

    let err = ConfigFile::try_from(raw).unwrap_err();
    assert!(matches!(err, BuildError::TaskCycle(_)));
}

#[test]
fn self_referencing_task_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task("loop", &["echo again", "${loop}"])
        .raw();

    let err = ConfigFile::try_from(raw).unwrap_err();
    match err {
        BuildError::TaskCycle(msg) => assert!(msg.contains("loop"), "{msg}"),
        other => panic!("expected TaskCycle, got {other:?}"),
    }
}

#[test]
fn references_to_unknown_tasks_load_fine() {
    // Unknown names only fail when the referencing command actually runs.
    let raw = ConfigFileBuilder::new()
        .with_task("default", &["${missing}"])
        .raw();

    assert!(ConfigFile::try_from(raw).is_ok());
}

#[test]
fn shared_callees_are_not_cycles() {
    let raw = ConfigFileBuilder::new()
        .with_task("default", &["${a}", "${b}"])
        .with_task("a", &["${common}"])
        .with_task("b", &["${common}"])
        .with_task("common", &["echo shared"])
        .raw();

    assert!(ConfigFile::try_from(raw).is_ok());
}

#[test]
fn format_is_chosen_by_extension() {
    assert_eq!(ConfigFormat::from_path(Path::new("build.toml")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("BUILD.TOML")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("build.yml")), ConfigFormat::Yaml);
    assert_eq!(ConfigFormat::from_path(Path::new("build.yaml")), ConfigFormat::Yaml);
    assert_eq!(ConfigFormat::from_path(Path::new("Buildfile")), ConfigFormat::Yaml);
}

#[test]
fn default_config_is_build_yml() {
    assert_eq!(default_config_path(), Path::new("build.yml"));
}
