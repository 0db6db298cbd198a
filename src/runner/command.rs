//! Command execution
//!
//! This module hands shell commands to the configured interpreter.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Context};
use std::process::{Command as StdCommand, Stdio};
use tracing::debug;

/// Execute a task's command in the given context.
///
/// Standard streams are inherited. A non-zero exit is reported as
/// [`ExecutionError::CommandFailed`] with the child's exit code.
pub fn execute_command(task_name: &str, cmd: &str, ctx: &Context) -> ExecutionResult<()> {
    let exec_str = interpolate(cmd, &ctx.vars)?;

    ctx.print_command(&exec_str);

    let mut command = build_command(&exec_str, ctx);
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    debug!(task = task_name, command = %exec_str, dir = %ctx.working_dir.display(), "spawning command");
    let status = command.status().map_err(|source| ExecutionError::Spawn {
        command: exec_str.clone(),
        source,
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed {
            task: task_name.to_string(),
            command: exec_str,
            code: status.code(),
        });
    }

    Ok(())
}

fn build_command(exec_str: &str, ctx: &Context) -> StdCommand {
    let mut parts = ctx.interpreter.iter();
    let mut command = match parts.next() {
        Some(program) => {
            let mut command = StdCommand::new(program);
            command.args(parts);
            command
        }
        None => {
            let mut command = StdCommand::new("sh");
            command.arg("-c");
            command
        }
    };
    command.arg(exec_str);
    command.current_dir(&ctx.working_dir);

    for (key, value) in &ctx.vars {
        command.env(key, value);
    }

    command
}
