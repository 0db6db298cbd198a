//! Task definitions
//!
//! A task is a name, an ordered list of dependency names, an optional body
//! and an optional target file. Dependencies are resolved by name when the
//! task runs, so they may be registered in any order.

use crate::error::BoxError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Function body of a task
pub type TaskFn = Box<dyn FnMut() -> Result<Option<String>, BoxError>>;

/// The executable body of a task
pub enum Payload {
    /// No body; the task only aggregates its dependencies
    None,

    /// Rust closure invoked with no arguments
    Function(TaskFn),

    /// Shell command handed to the interpreter
    Command(String),

    /// A body read from a task file that is neither a command nor empty.
    /// Running a task with this body fails.
    Invalid { found: String },
}

impl Payload {
    /// Wrap a closure as a function payload
    pub fn function<F>(f: F) -> Self
    where
        F: FnMut() -> Result<Option<String>, BoxError> + 'static,
    {
        Payload::Function(Box::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::None => f.write_str("None"),
            Payload::Function(_) => f.write_str("Function(..)"),
            Payload::Command(cmd) => f.debug_tuple("Command").field(cmd).finish(),
            Payload::Invalid { found } => f.debug_struct("Invalid").field("found", found).finish(),
        }
    }
}

impl From<&str> for Payload {
    fn from(cmd: &str) -> Self {
        Payload::Command(cmd.to_string())
    }
}

impl From<String> for Payload {
    fn from(cmd: String) -> Self {
        Payload::Command(cmd)
    }
}

/// A registered task
#[derive(Debug)]
pub struct Task {
    /// Task name, unique within a registry
    pub name: String,

    /// Names of tasks to run first, in order
    pub dependencies: Vec<String>,

    /// Body to execute
    pub payload: Payload,

    /// File this task produces, if it is a file task
    pub target_file: Option<PathBuf>,

    /// Set once the body has completed in this executor
    pub(crate) ran: bool,
}

impl Task {
    pub(crate) fn new(
        name: String,
        dependencies: Vec<String>,
        payload: Payload,
        target_file: Option<PathBuf>,
    ) -> Self {
        Task {
            name,
            dependencies,
            payload,
            target_file,
            ran: false,
        }
    }

    /// Whether the body has run to completion
    pub fn ran(&self) -> bool {
        self.ran
    }

    /// Whether this task produces a file
    pub fn is_file_task(&self) -> bool {
        self.target_file.is_some()
    }

    pub fn target_file(&self) -> Option<&Path> {
        self.target_file.as_deref()
    }
}

/// What happened when a task was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The body already ran earlier; nothing was executed
    AlreadyRan,

    /// The target file already exists; the body was not executed
    UpToDate,

    /// Dependencies ran; the task has no body of its own
    NoPayload,

    /// The body executed, producing an optional value
    Done(Option<String>),
}

impl Outcome {
    /// Value produced by the body, if it ran and returned one
    pub fn value(&self) -> Option<&str> {
        match self {
            Outcome::Done(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Whether the body executed during this call
    pub fn executed(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AlreadyRan => f.write_str("already ran"),
            Outcome::UpToDate => f.write_str("target up to date"),
            Outcome::NoPayload => f.write_str("no body"),
            Outcome::Done(None) => f.write_str("done"),
            Outcome::Done(Some(value)) => write!(f, "done: {}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_str_is_command() {
        let payload: Payload = "cargo build".into();
        assert!(matches!(payload, Payload::Command(ref c) if c == "cargo build"));
    }

    #[test]
    fn test_payload_debug_hides_closure() {
        let payload = Payload::function(|| Ok(None));
        assert_eq!(format!("{:?}", payload), "Function(..)");
    }

    #[test]
    fn test_outcome_value() {
        assert_eq!(Outcome::Done(Some("42".to_string())).value(), Some("42"));
        assert_eq!(Outcome::Done(None).value(), None);
        assert_eq!(Outcome::UpToDate.value(), None);
        assert!(!Outcome::AlreadyRan.executed());
        assert!(Outcome::Done(None).executed());
    }

    #[test]
    fn test_new_task_has_not_run() {
        let task = Task::new("a".to_string(), vec![], Payload::None, None);
        assert!(!task.ran());
        assert!(!task.is_file_task());
    }
}
