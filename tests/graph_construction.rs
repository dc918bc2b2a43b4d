// tests/graph_construction.rs

use taskdag::dag::{TaskAction, TaskGraph, TaskOptions};
use taskdag::errors::TaskdagError;
use taskdag::types::EdgeKind;

fn graph_with(names: &[&str]) -> TaskGraph {
    let mut graph = TaskGraph::new();
    for name in names {
        graph.register(*name, TaskAction::noop()).unwrap();
    }
    graph
}

#[test]
fn duplicate_registration_is_rejected_and_keeps_original() {
    let mut graph = TaskGraph::new();
    graph
        .register_with(
            "build",
            TaskAction::noop(),
            TaskOptions::default().with_description("original"),
        )
        .unwrap();

    let err = graph
        .register_with("build", TaskAction::noop(), TaskOptions::hidden())
        .unwrap_err();

    assert!(matches!(err, TaskdagError::DuplicateTask(ref n) if n == "build"));
    assert_eq!(graph.len(), 1);
    let task = graph.task("build").unwrap();
    assert!(task.is_visible());
    assert_eq!(task.description(), Some("original"));
}

#[test]
fn empty_name_is_rejected() {
    let mut graph = TaskGraph::new();
    let err = graph.register("", TaskAction::noop()).unwrap_err();
    assert!(matches!(err, TaskdagError::InvalidTaskName(_)));
    assert!(graph.is_empty());
}

#[test]
fn edges_to_unknown_tasks_are_rejected_without_mutation() {
    let mut graph = graph_with(&["a"]);

    for result in [
        graph.add_requires("a", "missing"),
        graph.add_finalized_by("a", "missing"),
        graph.add_soft_after("a", "missing"),
    ] {
        match result {
            Err(TaskdagError::UnknownTask(name)) => assert_eq!(name, "missing"),
            other => panic!("expected UnknownTask, got {other:?}"),
        }
    }

    let err = graph.add_requires("missing", "a").unwrap_err();
    assert!(matches!(err, TaskdagError::UnknownTask(ref n) if n == "missing"));

    assert!(graph.requires_of("a").is_empty());
    assert!(graph.finalized_by_of("a").is_empty());
    assert!(graph.soft_after_of("a").is_empty());
}

#[test]
fn self_edges_are_invalid() {
    let mut graph = graph_with(&["a"]);

    let err = graph.add_finalized_by("a", "a").unwrap_err();
    match err {
        TaskdagError::InvalidEdge { kind, from, to, .. } => {
            assert_eq!(kind, EdgeKind::FinalizedBy);
            assert_eq!(from, "a");
            assert_eq!(to, "a");
        }
        other => panic!("expected InvalidEdge, got {other:?}"),
    }
    assert!(graph.finalized_by_of("a").is_empty());
}

#[test]
fn adding_the_same_edge_twice_keeps_one() {
    let mut graph = graph_with(&["a", "b"]);
    graph.add_requires("a", "b").unwrap();
    graph.add_requires("a", "b").unwrap();
    assert_eq!(graph.requires_of("a").to_vec(), vec!["b"]);
}

#[test]
fn prefix_matching_is_ordered_and_restartable() {
    let graph = graph_with(&["putOnSocks", "eatBreakfast", "putOnShoes", "put"]);

    let matches = graph.matching_by_prefix("putOn");
    let first: Vec<&str> = matches.clone().collect();
    let second: Vec<&str> = matches.collect();

    assert_eq!(first, vec!["putOnSocks", "putOnShoes"]);
    assert_eq!(first, second);

    assert_eq!(graph.matching_by_prefix("").count(), 4);
    assert_eq!(graph.matching_by_prefix("zzz").count(), 0);
}

#[test]
fn requires_matching_excludes_the_owner() {
    let mut graph = graph_with(&["check", "checkFormat", "checkLints"]);

    let matched = graph.requires_matching("check", "check").unwrap();

    assert_eq!(matched, vec!["checkFormat", "checkLints"]);
    assert_eq!(
        graph.requires_of("check").to_vec(),
        vec!["checkFormat", "checkLints"]
    );
}

#[test]
fn listing_respects_visibility_and_registration_order() {
    let mut graph = TaskGraph::new();
    graph.register("zeta", TaskAction::noop()).unwrap();
    graph
        .register_with("internal", TaskAction::noop(), TaskOptions::hidden())
        .unwrap();
    graph.register("alpha", TaskAction::noop()).unwrap();

    assert_eq!(graph.list_visible(), vec!["zeta", "alpha"]);
    assert_eq!(graph.list_all(), vec!["zeta", "internal", "alpha"]);
}

#[test]
fn validate_accepts_soft_edges_against_requires() {
    // Soft edges alone never make `validate` fail.
    let mut graph = graph_with(&["x", "y"]);
    graph.add_requires("y", "x").unwrap();
    graph.add_soft_after("x", "y").unwrap();
    assert!(graph.validate().is_ok());
}
