//! Task file parsing and loading
//!
//! This module reads rmk.yml task files, validates them, and registers their
//! tasks into an executor.

pub mod load;
pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use load::*;
pub use parse::*;
pub use schema::*;
pub use types::*;
