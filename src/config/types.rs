//! Core configuration types
//!
//! This module defines the data structures that represent an rmk.yml task file.

use crate::runner::Payload;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Top-level task file structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Application name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Application usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Tasks defined in the file
    #[serde(default)]
    pub tasks: HashMap<String, Task>,

    /// Interpreter to use for commands (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Dotenv files whose entries become variables
    #[serde(
        rename = "env-file",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_one_or_many"
    )]
    pub env_file: Vec<String>,

    /// Variables available to `${var}` interpolation
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, String>,

    /// Other task files whose tasks are merged into this one
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_one_or_many"
    )]
    pub include: Vec<String>,
}

/// A task definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Task {
    /// Description shown by `--tasks`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tasks to run first
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_one_or_many"
    )]
    pub deps: Vec<String>,

    /// What kind of task this is
    #[serde(default)]
    pub kind: TaskKind,

    /// Shell command to run. Kept as raw YAML so a malformed body is
    /// reported when the task runs rather than when the file loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<Value>,
}

impl Task {
    /// The body this definition registers with
    pub fn payload(&self) -> Payload {
        match &self.run {
            None | Some(Value::Null) => Payload::None,
            Some(Value::String(cmd)) => Payload::Command(cmd.clone()),
            Some(other) => Payload::Invalid {
                found: describe_value(other).to_string(),
            },
        }
    }
}

/// Kinds of task definitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Plain task with an optional command
    #[default]
    Task,

    /// Task that produces the file named like the task
    File,

    /// Dependencies only
    Group,
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Custom deserializer for lists that may be written as a single string
fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => {
            let mut items = Vec::new();
            for item in seq {
                let item = String::deserialize(item).map_err(D::Error::custom)?;
                items.push(item);
            }
            Ok(items)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}
