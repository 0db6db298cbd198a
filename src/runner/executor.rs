//! Dependency-resolving executor
//!
//! Runs a task after its dependencies, depth-first in declared order. A body
//! runs at most once per executor unless the top-level call is forced; file
//! tasks whose target already exists are skipped.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{execute_command, Context, Outcome, Payload, Registry};
use tracing::{debug, info};

/// Runs tasks from a registry
#[derive(Debug)]
pub struct Executor {
    registry: Registry,
    ctx: Context,
}

impl Executor {
    pub fn new(registry: Registry, ctx: Context) -> Self {
        Executor { registry, ctx }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access for registering more tasks between runs
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run `name` and everything it depends on.
    ///
    /// `force` applies to `name` only: it bypasses the already-ran and
    /// up-to-date checks for this task, never for its dependencies.
    pub fn run_task(&mut self, name: &str, force: bool) -> ExecutionResult<Outcome> {
        // A panicking body unwinds past the pops below; start each call clean.
        self.ctx.task_stack.clear();
        self.visit(name, force)
    }

    fn visit(&mut self, name: &str, force: bool) -> ExecutionResult<Outcome> {
        if self.ctx.is_task_in_stack(name) {
            return Err(ExecutionError::CyclicDependency(self.ctx.cycle_path(name)));
        }

        self.ctx.push_task(name.to_string());
        let result = self.resolve(name, force);
        self.ctx.pop_task();
        result
    }

    fn resolve(&mut self, name: &str, force: bool) -> ExecutionResult<Outcome> {
        let dependencies = self
            .registry
            .lookup(name)
            .map(|task| task.dependencies.clone())
            .ok_or_else(|| ExecutionError::UnknownTask(name.to_string()))?;

        for dependency in &dependencies {
            self.visit(dependency, false)?;
        }

        let task = self
            .registry
            .lookup_mut(name)
            .ok_or_else(|| ExecutionError::UnknownTask(name.to_string()))?;

        if !force {
            if task.ran {
                self.ctx.print_task_skip(name, "already ran");
                debug!(task = name, "already ran");
                return Ok(Outcome::AlreadyRan);
            }
            if let Some(target) = &task.target_file {
                if self.ctx.target_exists(target) {
                    self.ctx.print_task_skip(name, "target up to date");
                    debug!(task = name, target = %target.display(), "target up to date");
                    return Ok(Outcome::UpToDate);
                }
            }
        }

        // Payload-less tasks are not memoized; asking again re-walks their dependencies.
        let value = match &mut task.payload {
            Payload::None => return Ok(Outcome::NoPayload),
            Payload::Invalid { found } => {
                return Err(ExecutionError::InvalidPayload {
                    task: name.to_string(),
                    found: found.clone(),
                })
            }
            Payload::Function(body) => {
                self.ctx.print_task_start(name);
                info!(task = name, forced = force, "running function");
                body().map_err(|source| ExecutionError::Function {
                    task: name.to_string(),
                    source,
                })?
            }
            Payload::Command(command) => {
                self.ctx.print_task_start(name);
                info!(task = name, forced = force, "running command");
                execute_command(name, command, &self.ctx)?;
                None
            }
        };

        if let Some(target) = &task.target_file {
            if !self.ctx.target_exists(target) {
                return Err(ExecutionError::TargetNotCreated {
                    file: target.clone(),
                    task: name.to_string(),
                });
            }
        }

        task.ran = true;
        self.ctx.print_task_complete(name);
        Ok(Outcome::Done(value))
    }
}
