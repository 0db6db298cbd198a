//! Error types for rmk

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rmk operations
pub type Result<T> = std::result::Result<T, RmkError>;

/// Boxed error returned by function payloads
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for rmk
#[derive(Error, Debug)]
pub enum RmkError {
    /// Definition file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task registration errors
    #[error("Definition error: {0}")]
    Registry(#[from] RegistryError),

    /// Task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RmkError {
    /// Process exit code for this error.
    ///
    /// A failed shell command hands its own exit code through; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RmkError::Execution(ExecutionError::CommandFailed { code: Some(code), .. }) => *code,
            _ => 1,
        }
    }
}

/// Errors raised while registering tasks
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Task '{0}' is already defined")]
    DuplicateTask(String),
}

/// Definition file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find task file (searched: {0})")]
    NotFound(String),

    #[error("Invalid task file: {0}")]
    Invalid(String),

    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("Failed to include file '{path}': {error}")]
    IncludeFile { path: PathBuf, error: String },

    #[error("Failed to load env file '{path}': {error}")]
    EnvFile { path: PathBuf, error: String },
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Task '{0}' is not defined")]
    UnknownTask(String),

    #[error("Task '{task}' has an invalid body: expected a command string, found {found}")]
    InvalidPayload { task: String, found: String },

    #[error("File '{file}' was not created by task '{task}'")]
    TargetNotCreated { file: PathBuf, task: String },

    #[error("Task '{task}' failed: `{command}` exited with code {code:?}")]
    CommandFailed {
        task: String,
        command: String,
        code: Option<i32>,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Task '{task}' failed: {source}")]
    Function {
        task: String,
        #[source]
        source: BoxError,
    },

    #[error("Circular dependency detected: {0}")]
    CyclicDependency(String),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Recursive interpolation detected")]
    RecursiveInterpolation,
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for registration
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;
