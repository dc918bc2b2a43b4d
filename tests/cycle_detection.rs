// tests/cycle_detection.rs

mod common;
use crate::common::builders::GraphBuilder;

use taskdag::dag::Scheduler;
use taskdag::errors::TaskdagError;

fn cycle_path(err: TaskdagError) -> Vec<String> {
    match err {
        TaskdagError::Cycle { path } => path,
        other => panic!("expected Cycle error, got {other:?}"),
    }
}

#[test]
fn mutual_requires_fails_validate_and_execute() {
    let (graph, recorder) = GraphBuilder::new()
        .task("A")
        .task("B")
        .requires("A", "B")
        .requires("B", "A")
        .build();

    let path = cycle_path(graph.validate().unwrap_err());
    assert_eq!(path, vec!["A", "B", "A"]);

    let path = cycle_path(Scheduler::new(&graph).execute(["A"]).unwrap_err());
    assert_eq!(path, vec!["A", "B", "A"]);
    assert!(recorder.executed().is_empty());
}

#[test]
fn finalizer_that_is_also_required_forms_a_cycle() {
    let (graph, _recorder) = GraphBuilder::new()
        .task("build")
        .task("cleanup")
        .requires("build", "cleanup")
        .finalized_by("build", "cleanup")
        .build();

    let path = cycle_path(graph.validate().unwrap_err());
    assert_eq!(path.first(), path.last());
    assert!(path.contains(&"build".to_string()));
    assert!(path.contains(&"cleanup".to_string()));
}

#[test]
fn longer_cycle_is_reported_in_precedence_order() {
    // c requires b, b requires a, a requires c: a runs before b before c before a.
    let (graph, _recorder) = GraphBuilder::new()
        .task("a")
        .task("b")
        .task("c")
        .task("unrelated")
        .requires("b", "a")
        .requires("c", "b")
        .requires("a", "c")
        .build();

    let path = cycle_path(graph.validate().unwrap_err());
    assert_eq!(path, vec!["a", "b", "c", "a"]);
}

#[test]
fn soft_edge_cycle_is_only_detected_when_both_tasks_run() {
    // y requires x, but x must run after y when both are present.
    let (graph, recorder) = GraphBuilder::new()
        .task("x")
        .task("y")
        .requires("y", "x")
        .soft_after("x", "y")
        .build();

    assert!(graph.validate().is_ok());

    let result = Scheduler::new(&graph).execute(["x"]).unwrap();
    assert_eq!(result.order(), vec!["x"]);

    let path = cycle_path(Scheduler::new(&graph).execute(["y"]).unwrap_err());
    assert_eq!(path, vec!["x", "y", "x"]);
    assert_eq!(recorder.executed(), vec!["x"]);
}

#[test]
fn unknown_goal_is_rejected_before_running_anything() {
    let (graph, recorder) = GraphBuilder::new().task("known").build();

    let err = Scheduler::new(&graph).execute(["known", "ghost"]).unwrap_err();

    assert!(matches!(err, TaskdagError::UnknownTask(ref n) if n == "ghost"));
    assert!(recorder.executed().is_empty());
}
