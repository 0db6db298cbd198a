//! Task registry
//!
//! Maps task names to definitions and keeps descriptions alongside. A
//! description may be attached to a name before, after, or without the task
//! itself being registered.

use crate::error::{RegistryError, RegistryResult};
use crate::runner::{Payload, Task};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::debug;

/// Collection of named tasks
#[derive(Debug, Default)]
pub struct Registry {
    tasks: HashMap<String, Task>,
    descriptions: HashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task.
    ///
    /// An empty name is ignored and yields `Ok(None)`. Registering a name
    /// that already exists fails and leaves the first definition in place.
    pub fn register(
        &mut self,
        name: &str,
        dependencies: Vec<String>,
        payload: Payload,
        target_file: Option<PathBuf>,
    ) -> RegistryResult<Option<&Task>> {
        if name.is_empty() {
            return Ok(None);
        }
        if self.tasks.contains_key(name) {
            return Err(RegistryError::DuplicateTask(name.to_string()));
        }

        debug!(task = name, deps = ?dependencies, "registering task");
        let task = Task::new(name.to_string(), dependencies, payload, target_file);
        let task: &Task = self.tasks.entry(name.to_string()).or_insert(task);
        Ok(Some(task))
    }

    /// Register a task with a function or command body
    pub fn task(
        &mut self,
        name: &str,
        dependencies: Vec<String>,
        payload: impl Into<Payload>,
    ) -> RegistryResult<Option<&Task>> {
        self.register(name, dependencies, payload.into(), None)
    }

    /// Register a file task whose target is its own name
    pub fn file(
        &mut self,
        name: &str,
        dependencies: Vec<String>,
        payload: impl Into<Payload>,
    ) -> RegistryResult<Option<&Task>> {
        self.register(name, dependencies, payload.into(), Some(PathBuf::from(name)))
    }

    /// Register a group: dependencies only, no body
    pub fn group(&mut self, name: &str, dependencies: Vec<String>) -> RegistryResult<Option<&Task>> {
        self.register(name, dependencies, Payload::None, None)
    }

    /// Set or read the description for `name`.
    ///
    /// With `Some(text)`, replaces any previous description and returns it.
    /// With `None`, returns the current description.
    pub fn describe(&mut self, name: &str, text: Option<&str>) -> Option<&str> {
        if let Some(text) = text {
            self.descriptions.insert(name.to_string(), text.to_string());
        }
        self.description(name)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    /// All registered task names
    pub fn names(&self) -> HashSet<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry
            .task("build", vec!["fetch".to_string()], "cargo build")
            .unwrap();

        let task = registry.lookup("build").unwrap();
        assert_eq!(task.name, "build");
        assert_eq!(task.dependencies, vec!["fetch"]);
        assert!(matches!(task.payload, Payload::Command(ref c) if c == "cargo build"));
        assert!(task.target_file.is_none());
        assert!(!task.ran());
    }

    #[test]
    fn test_register_empty_name_is_ignored() {
        let mut registry = Registry::new();
        let result = registry.group("", vec![]).unwrap();
        assert!(result.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_keeps_first_definition() {
        let mut registry = Registry::new();
        registry.task("a", vec![], "echo first").unwrap();

        let result = registry.task("a", vec![], "echo second");
        assert!(matches!(result, Err(RegistryError::DuplicateTask(ref n)) if n == "a"));

        let task = registry.lookup("a").unwrap();
        assert!(matches!(task.payload, Payload::Command(ref c) if c == "echo first"));
    }

    #[test]
    fn test_file_task_targets_its_name() {
        let mut registry = Registry::new();
        registry.file("out/app.bin", vec![], "touch out/app.bin").unwrap();

        let task = registry.lookup("out/app.bin").unwrap();
        assert_eq!(task.target_file(), Some(std::path::Path::new("out/app.bin")));
        assert!(task.is_file_task());
    }

    #[test]
    fn test_group_has_no_payload() {
        let mut registry = Registry::new();
        registry
            .group("all", vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert!(registry.lookup("all").unwrap().payload.is_none());
    }

    #[test]
    fn test_describe_set_and_get() {
        let mut registry = Registry::new();
        assert_eq!(registry.describe("build", None), None);
        assert_eq!(registry.describe("build", Some("x")), Some("x"));
        assert_eq!(registry.describe("build", None), Some("x"));
        assert_eq!(registry.describe("build", Some("y")), Some("y"));
        assert!(!registry.contains("build"));
    }

    #[test]
    fn test_names() {
        let mut registry = Registry::new();
        registry.group("Alpha", vec![]).unwrap();
        registry.task("Beta", vec![], "true").unwrap();

        let names = registry.names();
        assert_eq!(names, HashSet::from(["Alpha", "Beta"]));
    }
}
