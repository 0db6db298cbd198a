//! Turning a parsed task file into a ready executor

use crate::config::schema::validate_config;
use crate::config::types::{Config, TaskKind};
use crate::error::{ConfigError, RmkError};
use crate::runner::{Context, Executor, Registry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Register every task in `config`, with its description
pub fn build_registry(config: &Config) -> Result<Registry, RmkError> {
    let mut registry = Registry::new();

    let mut names: Vec<&String> = config.tasks.keys().collect();
    names.sort();

    for name in names {
        let task = &config.tasks[name];
        if name.is_empty() {
            warn!("ignoring task with an empty name");
            continue;
        }

        let deps = task.deps.clone();
        match task.kind {
            TaskKind::Task => registry.task(name, deps, task.payload())?,
            TaskKind::File => registry.file(name, deps, task.payload())?,
            TaskKind::Group => registry.group(name, deps)?,
        };

        if let Some(description) = &task.description {
            registry.describe(name, Some(description.as_str()));
        }
    }

    Ok(registry)
}

/// Load variables from dotenv files, relative to `base_dir`
pub fn load_env_files(
    files: &[String],
    base_dir: &Path,
) -> Result<HashMap<String, String>, RmkError> {
    let mut vars = HashMap::new();

    for file in files {
        let path = base_dir.join(file);
        let env_error = |error: String| ConfigError::EnvFile {
            path: path.clone(),
            error,
        };

        let entries = dotenvy::from_path_iter(&path).map_err(|e| env_error(e.to_string()))?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| env_error(e.to_string()))?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), "loaded env file");
    }

    Ok(vars)
}

/// Build an executor for `config`.
///
/// Commands run in `base_dir` (normally the task file's directory).
/// Variables already present in `ctx` take precedence over the file's
/// `vars`, which take precedence over env files.
pub fn into_executor(
    config: Config,
    base_dir: &Path,
    ctx: Context,
) -> Result<Executor, RmkError> {
    validate_config(&config)?;
    let registry = build_registry(&config)?;

    let mut vars = load_env_files(&config.env_file, base_dir)?;
    vars.extend(config.vars);

    let mut ctx = ctx.with_working_dir(PathBuf::from(base_dir));
    for (key, value) in vars {
        ctx.vars.entry(key).or_insert(value);
    }
    if let Some(interpreter) = config.interpreter {
        ctx = ctx.with_interpreter(interpreter);
    }

    Ok(Executor::new(registry, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::runner::{Payload, Verbosity};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_registry_kinds_and_descriptions() {
        let yaml = r#"
tasks:
  build:
    description: Compile
    run: cargo build
  out.bin:
    kind: file
    deps: build
    run: cp target/app out.bin
  all:
    kind: group
    deps: [build, out.bin]
"#;
        let config = parse_config(yaml, None).unwrap();
        let registry = build_registry(&config).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.description("build"), Some("Compile"));
        assert_eq!(registry.description("all"), None);

        let file = registry.lookup("out.bin").unwrap();
        assert_eq!(file.target_file(), Some(Path::new("out.bin")));
        assert_eq!(file.dependencies, vec!["build"]);

        let all = registry.lookup("all").unwrap();
        assert!(matches!(all.payload, Payload::None));
    }

    #[test]
    fn test_env_file_and_var_precedence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "A=from_env\nB=from_env\nC=from_env\n").unwrap();

        let yaml = r#"
env-file: .env
vars:
  B: from_vars
  C: from_vars
tasks: {}
"#;
        let config = parse_config(yaml, None).unwrap();

        let mut overrides = HashMap::new();
        overrides.insert("C".to_string(), "from_cli".to_string());
        let ctx = Context::new()
            .with_verbosity(Verbosity::Silent)
            .with_vars(overrides);

        let exec = into_executor(config, temp_dir.path(), ctx).unwrap();
        let ctx = exec.context();
        assert_eq!(ctx.get_var("A").map(String::as_str), Some("from_env"));
        assert_eq!(ctx.get_var("B").map(String::as_str), Some("from_vars"));
        assert_eq!(ctx.get_var("C").map(String::as_str), Some("from_cli"));
        assert_eq!(ctx.working_dir, temp_dir.path());
    }

    #[test]
    fn test_missing_env_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = parse_config("env-file: nope.env\ntasks: {}\n", None).unwrap();

        let result = into_executor(config, temp_dir.path(), Context::new());
        assert!(matches!(
            result,
            Err(RmkError::Config(ConfigError::EnvFile { .. }))
        ));
    }

    #[test]
    fn test_interpreter_is_applied() {
        let config = parse_config("interpreter: [bash, -c]\ntasks: {}\n", None).unwrap();
        let exec = into_executor(config, Path::new("."), Context::new()).unwrap();
        assert_eq!(exec.context().interpreter, vec!["bash", "-c"]);
    }
}
