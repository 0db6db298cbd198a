//! Task file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, RegistryError, RmkError};
use directories::ProjectDirs;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default task file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["rmk.yml", "rmk.yaml"];

/// Find the task file in the current directory, its ancestors, or the
/// per-user config directory
pub fn find_config_file() -> ConfigResult<PathBuf> {
    let current_dir = env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?;

    match find_config_file_from(current_dir) {
        Ok(path) => Ok(path),
        Err(ConfigError::NotFound(searched)) => match user_config_dir() {
            Some(dir) => find_in_dir(&dir).ok_or_else(|| {
                ConfigError::NotFound(format!("{}, {}", searched, dir.display()))
            }),
            None => Err(ConfigError::NotFound(searched)),
        },
        Err(e) => Err(e),
    }
}

/// Find the task file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        if let Some(found) = find_in_dir(&current_dir) {
            return Ok(found);
        }
        searched_paths.push(current_dir.display().to_string());

        // Try parent directory
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Per-user fallback directory, e.g. `~/.config/rmk`
fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rmk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Parse a task file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, RmkError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_config(&contents, Some(path))
}

/// Parse a task file from a string.
///
/// Includes are resolved only when `config_path` is given, relative to its
/// directory.
pub fn parse_config(yaml: &str, config_path: Option<&Path>) -> Result<Config, RmkError> {
    let mut config: Config = serde_yaml::from_str(yaml)?;

    if let Some(path) = config_path {
        let root = canonical(path);
        let mut merged = HashSet::new();
        merged.insert(root.clone());
        process_includes(&mut config, path, &mut vec![root], &mut merged)?;
    }

    Ok(config)
}

/// Merge tasks from included files into `config`.
///
/// `chain` holds the files currently being included, outermost first; meeting
/// one of them again is a loop. A file reached a second time through another
/// branch is already in `merged` and is skipped.
fn process_includes(
    config: &mut Config,
    config_path: &Path,
    chain: &mut Vec<PathBuf>,
    merged: &mut HashSet<PathBuf>,
) -> Result<(), RmkError> {
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    for include in std::mem::take(&mut config.include) {
        let include_path = base_dir.join(&include);
        let key = canonical(&include_path);

        if let Some(start) = chain.iter().position(|p| *p == key) {
            let mut cycle: Vec<String> = chain[start..]
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            cycle.push(key.display().to_string());
            return Err(ConfigError::IncludeFile {
                path: include_path,
                error: format!("include loop: {}", cycle.join(" -> ")),
            }
            .into());
        }
        if !merged.insert(key.clone()) {
            debug!(path = %include_path.display(), "already included, skipping");
            continue;
        }

        debug!(path = %include_path.display(), "including task file");
        let mut included = load_included(&include_path)?;
        chain.push(key);
        let nested = process_includes(&mut included, &include_path, chain, merged);
        chain.pop();
        nested?;

        for (name, task) in included.tasks {
            if config.tasks.contains_key(&name) {
                return Err(RegistryError::DuplicateTask(name).into());
            }
            config.tasks.insert(name, task);
        }
        for (key, value) in included.vars {
            config.vars.entry(key).or_insert(value);
        }
    }

    Ok(())
}

fn load_included(path: &Path) -> Result<Config, RmkError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::IncludeFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::IncludeFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    Ok(config)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Parse the task file with automatic discovery
pub fn parse_config_auto() -> Result<(Config, PathBuf), RmkError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}
