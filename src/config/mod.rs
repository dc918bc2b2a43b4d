// src/config/mod.rs

//! Task file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a task file from disk (`loader.rs`).
//! - Validate references and acyclicity, and build the [`TaskGraph`](crate::dag::TaskGraph)
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
pub use validate::validate_config;
