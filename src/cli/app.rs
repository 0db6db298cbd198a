//! Main CLI application

use crate::config::{into_executor, parse_config_auto, parse_config_file, Config};
use crate::error::RmkError;
use crate::runner::{Context, Registry, Verbosity};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "RMK_LOG";

/// Build the clap command, named and described by the task file when one is loaded
pub fn build_command(config: Option<&Config>) -> Command {
    let name = config
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| "rmk".to_string());
    let about = config
        .and_then(|c| c.usage.clone())
        .unwrap_or_else(|| "A minimal build tool".to_string());

    Command::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to rmk.yml task file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("tasks")
                .help("List tasks and their descriptions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Run the named tasks even if they are done or up to date")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("var")
                .long("var")
                .value_name("KEY=VALUE")
                .value_parser(parse_key_value)
                .action(ArgAction::Append)
                .help("Set a variable, overriding the task file"),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(value_parser!(Shell))
                .help("Print a shell completion script"),
        )
        .arg(
            Arg::new("task")
                .value_name("TASK")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Tasks to run, in order"),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Install the stderr log subscriber; `RMK_LOG` overrides the default filter
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Directory the task file's commands run in
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Print task names, sorted, with descriptions
fn print_task_list(registry: &Registry) {
    let mut names: Vec<&str> = registry.names().into_iter().collect();
    names.sort_unstable();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

    for name in names {
        match registry.description(name) {
            Some(description) => {
                println!("{}  {}", format!("{:<width$}", name).bold(), description)
            }
            None => println!("{}", name.bold()),
        }
    }
}

/// Run the CLI with the process arguments
pub fn run() -> Result<(), RmkError> {
    run_from(std::env::args_os())
}

/// Run the CLI with the given arguments
pub fn run_from<I, T>(args: I) -> Result<(), RmkError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(None).get_matches_from(args);
    init_tracing();

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        let mut cmd = build_command(None);
        clap_complete::generate(*shell, &mut cmd, "rmk", &mut io::stdout());
        return Ok(());
    }

    let (config, config_path) = match matches.get_one::<PathBuf>("file") {
        Some(path) => (parse_config_file(path)?, path.clone()),
        None => parse_config_auto()?,
    };
    let mut help = build_command(Some(&config));

    let vars: HashMap<String, String> = matches
        .get_many::<(String, String)>("var")
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let ctx = Context::new()
        .with_verbosity(get_verbosity(&matches))
        .with_vars(vars);

    let mut executor = into_executor(config, &config_dir(&config_path), ctx)?;

    if matches.get_flag("list") {
        print_task_list(executor.registry());
        return Ok(());
    }

    let tasks: Vec<&String> = matches
        .get_many::<String>("task")
        .into_iter()
        .flatten()
        .collect();
    if tasks.is_empty() {
        help.print_help()?;
        println!();
        return Ok(());
    }

    let force = matches.get_flag("force");
    for name in tasks {
        let outcome = executor.run_task(name, force)?;
        executor
            .context()
            .print_debug(&format!("{}: {}", name, outcome));
    }

    Ok(())
}
