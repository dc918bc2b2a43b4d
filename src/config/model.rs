// src/config/model.rs

use serde::Deserialize;

/// Task file as read from TOML, before semantic validation.
///
/// ```toml
/// [config]
/// default_tasks = ["getReady"]
///
/// [[task]]
/// name = "putOnSocks"
/// cmd = "echo 'Putting on socks.'"
///
/// [[task]]
/// name = "putOnShoes"
/// cmd = "echo 'Putting on shoes.'"
/// requires = ["putOnSocks"]
/// ```
///
/// Tasks are an array of tables so that declaration order is kept; it is
/// the registration order of the resulting graph.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[task]]` entries, in declaration order.
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// Validated task file. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<TaskConfig>) -> Self {
        Self { config, task }
    }

    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.task.iter().find(|t| t.name == name)
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Goals used by `taskdag run` when no task names are given.
    #[serde(default)]
    pub default_tasks: Vec<String>,

    /// Program used to run `cmd`, invoked as `<shell> -c <cmd>`.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_shell() -> String {
    "sh".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            default_tasks: Vec::new(),
            shell: default_shell(),
        }
    }
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Unique task name.
    pub name: String,

    /// Shell command to run. Tasks without a command only aggregate other
    /// tasks and always succeed.
    #[serde(default)]
    pub cmd: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Hidden tasks are left out of `taskdag tasks` unless `--all` is given.
    #[serde(default)]
    pub hidden: bool,

    /// Hard dependencies: must succeed before this task starts.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Every task whose name starts with one of these prefixes is added to
    /// `requires` (this task itself excluded).
    #[serde(default)]
    pub requires_prefix: Vec<String>,

    /// Tasks that run after this one whenever this one runs.
    #[serde(default)]
    pub finalized_by: Vec<String>,

    /// Soft ordering: if any of these tasks is part of the same run, it
    /// runs first.
    #[serde(default)]
    pub must_run_after: Vec<String>,
}
