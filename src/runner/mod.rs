//! Task registry and execution engine
//!
//! This module holds task definitions, the registry they live in, and the
//! executor that resolves dependencies and runs task bodies.

pub mod command;
pub mod context;
pub mod executor;
pub mod interpolate;
pub mod registry;
pub mod task;

// Re-export main types
pub use command::*;
pub use context::*;
pub use executor::*;
pub use interpolate::*;
pub use registry::*;
pub use task::*;
