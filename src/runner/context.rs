//! Execution context for task running
//!
//! The context holds everything a run needs besides the task graph itself:
//! where commands run, how they are interpreted, variables, and the stack of
//! tasks currently being resolved.

use colored::Colorize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Execution context that tracks state during task execution
#[derive(Debug)]
pub struct Context {
    /// Directory commands run in and relative targets resolve against
    pub working_dir: PathBuf,

    /// Variables for interpolation, also exported to commands
    pub vars: HashMap<String, String>,

    /// Command interpreter (e.g., ["bash", "-c"])
    pub interpreter: Vec<String>,

    /// Tasks currently being resolved, outermost first
    pub task_stack: Vec<String>,

    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            vars: HashMap::new(),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            task_stack: Vec::new(),
            verbosity: Verbosity::Normal,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set variables
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set a single variable
    pub fn set_var(&mut self, key: String, value: String) {
        self.vars.insert(key, value);
    }

    /// Get a variable value
    pub fn get_var(&self, key: &str) -> Option<&String> {
        self.vars.get(key)
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Push a task onto the resolution stack
    pub fn push_task(&mut self, task_name: String) {
        self.task_stack.push(task_name);
    }

    /// Pop a task from the resolution stack
    pub fn pop_task(&mut self) -> Option<String> {
        self.task_stack.pop()
    }

    /// Check if a task is being resolved further up the stack
    pub fn is_task_in_stack(&self, task_name: &str) -> bool {
        self.task_stack.iter().any(|t| t == task_name)
    }

    /// Render the dependency chain that leads back to `task_name`
    pub fn cycle_path(&self, task_name: &str) -> String {
        let start = self
            .task_stack
            .iter()
            .position(|t| t == task_name)
            .unwrap_or(0);
        let mut path: Vec<&str> = self.task_stack[start..].iter().map(String::as_str).collect();
        path.push(task_name);
        path.join(" -> ")
    }

    /// Resolve a path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.working_dir.join(path)
    }

    /// Whether a task's target file exists
    pub fn target_exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[INFO]".green(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }

    /// Print a command about to run
    pub fn print_command(&self, command: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[RUN]".cyan().bold(), command);
        }
    }

    /// Print task start message
    pub fn print_task_start(&self, task_name: &str) {
        self.print_info(&format!("Running task: {}", task_name));
    }

    /// Print task complete message
    pub fn print_task_complete(&self, task_name: &str) {
        self.print_debug(&format!("Task completed: {}", task_name));
    }

    /// Print task skip message
    pub fn print_task_skip(&self, task_name: &str, reason: &str) {
        self.print_debug(&format!("Skipping task '{}': {}", task_name, reason));
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_new() {
        let ctx = Context::new();
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
        assert!(ctx.vars.is_empty());
        assert!(ctx.task_stack.is_empty());
    }

    #[test]
    fn test_context_set_var() {
        let mut ctx = Context::new();
        ctx.set_var("test".to_string(), "value".to_string());
        assert_eq!(ctx.get_var("test"), Some(&"value".to_string()));
    }

    #[test]
    fn test_task_stack() {
        let mut ctx = Context::new();
        assert!(!ctx.is_task_in_stack("a"));

        ctx.push_task("a".to_string());
        ctx.push_task("b".to_string());
        assert!(ctx.is_task_in_stack("a"));
        assert!(ctx.is_task_in_stack("b"));

        assert_eq!(ctx.pop_task(), Some("b".to_string()));
        assert!(!ctx.is_task_in_stack("b"));
    }

    #[test]
    fn test_cycle_path_starts_at_repeated_task() {
        let mut ctx = Context::new();
        for name in ["all", "a", "b"] {
            ctx.push_task(name.to_string());
        }
        assert_eq!(ctx.cycle_path("a"), "a -> b -> a");
    }

    #[test]
    fn test_target_exists_is_relative_to_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("built.txt"), "ok").unwrap();

        let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());
        assert!(ctx.target_exists(Path::new("built.txt")));
        assert!(!ctx.target_exists(Path::new("missing.txt")));
    }

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
    }
}
