// src/exec/mod.rs

//! Action construction layer.
//!
//! The scheduler treats actions as opaque callables; this module is where
//! task definitions from a task file become such callables.
//!
//! - [`command`] builds actions that run a shell command.
//! - [`backend`] provides the `ActionFactory` trait and the
//!   `ShellActionFactory` used in production, which tests can replace with
//!   a recording implementation.

pub mod backend;
pub mod command;

pub use backend::{ActionFactory, ShellActionFactory};
pub use command::shell_action;
