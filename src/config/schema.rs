//! Task file validation

use crate::config::types::{Config, Task, TaskKind};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete task file
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    for (name, task) in &config.tasks {
        validate_task(name, task)?;
    }

    if matches!(&config.interpreter, Some(interpreter) if interpreter.is_empty()) {
        return Err(ConfigError::Invalid("interpreter must not be empty".to_string()));
    }

    detect_circular_dependencies(config)?;

    Ok(())
}

/// Validate a single task
pub fn validate_task(name: &str, task: &Task) -> ConfigResult<()> {
    if task.kind == TaskKind::Group && !task.payload().is_none() {
        return Err(ConfigError::Invalid(format!(
            "group '{}' cannot have a run command",
            name
        )));
    }
    if task.kind == TaskKind::File && name.is_empty() {
        return Err(ConfigError::Invalid(
            "file task needs a name to use as its target".to_string(),
        ));
    }
    Ok(())
}

/// Detect cycles in task dependencies.
///
/// Dependencies on tasks the file does not define are skipped here; they
/// are reported when the task runs.
fn detect_circular_dependencies(config: &Config) -> ConfigResult<()> {
    let mut visited = HashSet::new();
    let mut names: Vec<&String> = config.tasks.keys().collect();
    names.sort();

    for task_name in names {
        let mut stack = Vec::new();
        check_task_cycle(config, task_name, &mut visited, &mut stack)?;
    }
    Ok(())
}

/// Recursively check for cycles in task dependencies
fn check_task_cycle<'a>(
    config: &'a Config,
    task_name: &'a str,
    visited: &mut HashSet<&'a str>,
    stack: &mut Vec<&'a str>,
) -> ConfigResult<()> {
    if let Some(start) = stack.iter().position(|t| *t == task_name) {
        let mut cycle = stack[start..].to_vec();
        cycle.push(task_name);
        return Err(ConfigError::CircularDependency(cycle.join(" -> ")));
    }

    // Skip if already fully processed
    if visited.contains(task_name) {
        return Ok(());
    }

    let Some(task) = config.tasks.get(task_name) else {
        return Ok(());
    };

    stack.push(task_name);
    for dep in &task.deps {
        check_task_cycle(config, dep, visited, stack)?;
    }
    stack.pop();
    visited.insert(task_name);

    Ok(())
}
