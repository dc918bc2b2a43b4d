// src/exec/command.rs

//! Shell command actions.

use std::process::Command;

use anyhow::{Context, bail};
use tracing::{debug, info};

use crate::dag::TaskAction;

/// Build an action that runs `cmd` through `shell` and fails on a non-zero
/// exit status.
///
/// The child inherits stdout/stderr, so task output appears interleaved in
/// plan order. `cmd` (and `cmd.exe`) take `/C`; every other shell gets `-c`.
pub fn shell_action(task: &str, shell: &str, cmd: &str) -> TaskAction {
    let task = task.to_string();
    let shell = shell.to_string();
    let cmd = cmd.to_string();

    TaskAction::new(move || {
        info!(task = %task, cmd = %cmd, "starting task process");

        let flag = if is_cmd_exe(&shell) { "/C" } else { "-c" };
        let status = Command::new(&shell)
            .arg(flag)
            .arg(&cmd)
            .status()
            .with_context(|| format!("spawning process for task '{task}'"))?;

        debug!(task = %task, ?status, "task process exited");

        if !status.success() {
            match status.code() {
                Some(code) => bail!("command `{cmd}` exited with status {code}"),
                None => bail!("command `{cmd}` was terminated by a signal"),
            }
        }
        Ok(())
    })
}

fn is_cmd_exe(shell: &str) -> bool {
    let lower = shell.to_ascii_lowercase();
    lower == "cmd" || lower.ends_with("cmd.exe")
}
