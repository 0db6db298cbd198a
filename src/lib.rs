//! rmk - a minimal build tool
//!
//! Tasks are registered by name with dependencies and an optional body: a
//! Rust closure, a shell command, or nothing at all (a group). The executor
//! runs dependencies depth-first, runs each body at most once, and skips file
//! tasks whose target already exists.
//!
//! ```no_run
//! use rmk::runner::{Context, Executor, Payload, Registry};
//!
//! let mut registry = Registry::new();
//! registry.task("fetch", vec![], "git pull").unwrap();
//! registry.file("app.bin", vec!["fetch".into()], "cc -o app.bin main.c").unwrap();
//! registry.task("version", vec![], Payload::function(|| Ok(Some("1.0".into())))).unwrap();
//! registry.group("all", vec!["app.bin".into(), "version".into()]).unwrap();
//!
//! let mut executor = Executor::new(registry, Context::new());
//! executor.run_task("all", false).unwrap();
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{Result, RmkError};

/// Current version of rmk
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
