// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::{EdgeKind, TaskName};

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Task already registered: {0}")]
    DuplicateTask(TaskName),

    #[error("Task not found: {0}")]
    UnknownTask(TaskName),

    #[error("Invalid task name: {0:?}")]
    InvalidTaskName(String),

    #[error("Invalid {kind} edge '{from}' -> '{to}': {reason}")]
    InvalidEdge {
        kind: EdgeKind,
        from: TaskName,
        to: TaskName,
        reason: String,
    },

    #[error("Cycle detected in task graph: {}", .path.join(" -> "))]
    Cycle { path: Vec<TaskName> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Task '{task}' failed: {source:#}")]
    TaskFailed {
        task: TaskName,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskdagError>;
