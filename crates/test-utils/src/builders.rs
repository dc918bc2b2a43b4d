#![allow(dead_code)]

use taskdag::config::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use taskdag::dag::{TaskGraph, TaskOptions};

use crate::recorder::ActionRecorder;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn with_default_task(mut self, name: &str) -> Self {
        self.config.config.default_tasks.push(name.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            task: TaskConfig {
                name: name.to_string(),
                cmd: None,
                description: None,
                hidden: false,
                requires: vec![],
                requires_prefix: vec![],
                finalized_by: vec![],
                must_run_after: vec![],
            },
        }
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.task.cmd = Some(cmd.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.task.hidden = true;
        self
    }

    pub fn requires(mut self, dep: &str) -> Self {
        self.task.requires.push(dep.to_string());
        self
    }

    pub fn requires_prefix(mut self, prefix: &str) -> Self {
        self.task.requires_prefix.push(prefix.to_string());
        self
    }

    pub fn finalized_by(mut self, task: &str) -> Self {
        self.task.finalized_by.push(task.to_string());
        self
    }

    pub fn must_run_after(mut self, task: &str) -> Self {
        self.task.must_run_after.push(task.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// Builder for a `TaskGraph` whose actions are all recorded by one
/// [`ActionRecorder`].
pub struct GraphBuilder {
    graph: TaskGraph,
    recorder: ActionRecorder,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: TaskGraph::new(),
            recorder: ActionRecorder::new(),
        }
    }

    pub fn task(mut self, name: &str) -> Self {
        let action = self.recorder.action(name);
        self.graph.register(name, action).expect("register task");
        self
    }

    pub fn hidden_task(mut self, name: &str) -> Self {
        let action = self.recorder.action(name);
        self.graph
            .register_with(name, action, TaskOptions::hidden())
            .expect("register hidden task");
        self
    }

    pub fn requires(mut self, from: &str, to: &str) -> Self {
        self.graph.add_requires(from, to).expect("add requires edge");
        self
    }

    pub fn finalized_by(mut self, from: &str, to: &str) -> Self {
        self.graph.add_finalized_by(from, to).expect("add finalized_by edge");
        self
    }

    pub fn soft_after(mut self, from: &str, to: &str) -> Self {
        self.graph.add_soft_after(from, to).expect("add soft_after edge");
        self
    }

    pub fn failing(self, name: &str) -> Self {
        self.recorder.fail(name);
        self
    }

    pub fn build(self) -> (TaskGraph, ActionRecorder) {
        (self.graph, self.recorder)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
