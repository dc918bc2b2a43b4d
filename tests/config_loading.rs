// tests/config_loading.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::init_tracing;
use crate::common::recorder::ActionRecorder;

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;

use taskdag::config::{ConfigFile, load_and_validate};
use taskdag::dag::Scheduler;
use taskdag::errors::TaskdagError;
use taskdag::types::TaskState;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const MORNING: &str = r#"
[config]
default_tasks = ["getReady"]

[[task]]
name = "putOnSocks"
cmd = "echo socks"
description = "Puts on socks"

[[task]]
name = "putOnShoes"
cmd = "echo shoes"
requires = ["putOnSocks"]
must_run_after = ["takeShower"]

[[task]]
name = "eatBreakfast"
finalized_by = ["brushYourTeeth"]

[[task]]
name = "brushYourTeeth"
hidden = true

[[task]]
name = "takeShower"

[[task]]
name = "getReady"
requires = ["takeShower", "eatBreakfast"]
requires_prefix = ["putOn"]
"#;

#[test]
fn loads_tasks_in_declaration_order() -> TestResult {
    init_tracing();
    let file = write_config(MORNING);

    let cfg = load_and_validate(file.path())?;

    let names: Vec<&str> = cfg.task.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "putOnSocks",
            "putOnShoes",
            "eatBreakfast",
            "brushYourTeeth",
            "takeShower",
            "getReady",
        ]
    );
    assert_eq!(cfg.config.default_tasks, vec!["getReady"]);
    assert_eq!(cfg.config.shell, "sh");
    assert_eq!(
        cfg.task("putOnSocks").and_then(|t| t.description.as_deref()),
        Some("Puts on socks")
    );
    Ok(())
}

#[test]
fn built_graph_honours_all_three_relations() -> TestResult {
    init_tracing();
    let file = write_config(MORNING);
    let cfg = load_and_validate(file.path())?;
    let recorder = ActionRecorder::new();

    let graph = cfg.build_graph(&recorder)?;

    assert_eq!(graph.list_all().len(), 6);
    assert!(!graph.list_visible().contains(&"brushYourTeeth"));
    assert_eq!(
        graph.requires_of("getReady").to_vec(),
        vec!["takeShower", "eatBreakfast", "putOnSocks", "putOnShoes"]
    );

    let result = Scheduler::new(&graph).execute(&cfg.config.default_tasks)?;
    assert_eq!(
        recorder.executed(),
        vec![
            "putOnSocks",
            "eatBreakfast",
            "brushYourTeeth",
            "takeShower",
            "putOnShoes",
            "getReady",
        ]
    );
    assert_eq!(result.state_of("getReady"), Some(TaskState::Succeeded));
    Ok(())
}

#[test]
fn unknown_dependency_returns_config_error() {
    let file = write_config(
        r#"
[[task]]
name = "A"
requires = ["NonExistent"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TaskdagError::ConfigError(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("NonExistent"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn cycle_returns_structured_error() {
    let file = write_config(
        r#"
[[task]]
name = "A"
requires = ["B"]

[[task]]
name = "B"
requires = ["A"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TaskdagError::Cycle { path }) => assert_eq!(path, vec!["A", "B", "A"]),
        Err(e) => panic!("Expected Cycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_returns_toml_error() {
    let file = write_config("[[task]\nname = ");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(TaskdagError::TomlError(_))
    ));
}

#[test]
fn missing_file_returns_io_error() {
    assert!(matches!(
        load_and_validate("definitely/not/here/Taskdag.toml"),
        Err(TaskdagError::IoError(_))
    ));
}

#[test]
fn duplicate_names_are_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task(TaskConfigBuilder::new("lint").build())
        .with_task(TaskConfigBuilder::new("lint").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("more than once")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_config_is_rejected() {
    let raw = ConfigFileBuilder::new().raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(TaskdagError::ConfigError(_))
    ));
}

#[test]
fn unknown_default_task_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task(TaskConfigBuilder::new("build").build())
        .with_default_task("deploy")
        .raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("deploy")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn self_reference_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_task(TaskConfigBuilder::new("loop").must_run_after("loop").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("itself")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn shell_commands_report_exit_status() -> TestResult {
    init_tracing();
    use taskdag::exec::ShellActionFactory;

    let cfg = ConfigFileBuilder::new()
        .with_task(TaskConfigBuilder::new("ok").cmd("true").build())
        .with_task(TaskConfigBuilder::new("bad").cmd("exit 3").requires("ok").build())
        .with_task(TaskConfigBuilder::new("aggregate").requires("bad").build())
        .build();
    let graph = cfg.build_graph(&ShellActionFactory::new("sh"))?;

    let result = Scheduler::new(&graph).execute(["aggregate"])?;

    assert_eq!(result.state_of("ok"), Some(TaskState::Succeeded));
    let bad = result.report("bad").unwrap();
    assert_eq!(bad.state, TaskState::Failed);
    assert!(bad.error.as_ref().unwrap().to_string().contains("status 3"));
    assert_eq!(result.state_of("aggregate"), Some(TaskState::Skipped));
    Ok(())
}

#[test]
fn bundled_demo_file_plans_the_whole_morning() -> TestResult {
    let cfg = load_and_validate(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/Taskdag.toml"))?;
    let graph = cfg.build_graph(&ActionRecorder::new())?;

    let plan = Scheduler::new(&graph).plan(&cfg.config.default_tasks)?;

    assert_eq!(
        plan.order(),
        vec![
            "putOnSocks",
            "eatBreakfast",
            "brushYourTeeth",
            "takeShower",
            "putOnShoes",
            "putOnFragrance",
            "getReady",
        ]
    );
    Ok(())
}
