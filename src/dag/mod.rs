// src/dag/mod.rs

//! Task graph representation and scheduling.
//!
//! - [`graph`] holds the registered tasks and their three edge relations.
//! - [`task_info`] defines task nodes and their opaque actions.
//! - [`cycle`] finds cycles (with a printable path) using `petgraph`.
//! - [`plan`] computes the closure of a run and orders it.
//! - [`state_manager`] manages per-run state transitions.
//! - [`scheduler`] executes a plan, one task at a time.
//! - [`execution_result`] reports what happened to every task.

pub mod cycle;
pub mod execution_result;
pub mod graph;
pub mod plan;
pub mod scheduler;
pub mod state_manager;
pub mod task_info;

pub use execution_result::{ExecutionResult, RunStatus, TaskReport};
pub use graph::TaskGraph;
pub use plan::{ExecutionPlan, Inclusion, PlanEntry};
pub use scheduler::Scheduler;
pub use task_info::{Task, TaskAction, TaskOptions};
