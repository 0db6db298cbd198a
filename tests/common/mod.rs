//! Common test utilities

#![allow(dead_code)]

use rmk::runner::{Context, Executor, Registry, Verbosity};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with an rmk.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rmk.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Silent executor whose commands run in `dir`
pub fn executor_in(registry: Registry, dir: &TempDir) -> Executor {
    let ctx = Context::new()
        .with_verbosity(Verbosity::Silent)
        .with_working_dir(dir.path().to_path_buf());
    Executor::new(registry, ctx)
}
