//! Integration tests for the rmk binary

mod common;

use assert_cmd::Command;
use common::create_test_config;
use predicates::prelude::*;
use std::fs;

const TASKS: &str = r#"
name: demo
tasks:
  build:
    description: Build the thing
    run: echo build >> log.txt
  out.txt:
    kind: file
    deps: [build]
    run: echo out > out.txt
  fail:
    run: exit 3
  all:
    kind: group
    deps: [out.txt]
"#;

fn rmk() -> Command {
    let mut cmd = Command::cargo_bin("rmk").unwrap();
    cmd.env_remove("RMK_LOG");
    cmd
}

#[test]
fn test_list_tasks() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .arg("--tasks")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("Build the thing"))
        .stdout(predicate::str::contains("out.txt"))
        .stdout(predicate::str::contains("all"));
}

#[test]
fn test_run_group_builds_file() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .args(["-q", "all"])
        .assert()
        .success();

    assert!(temp_dir.path().join("out.txt").exists());
    let log = fs::read_to_string(temp_dir.path().join("log.txt")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn test_tasks_named_twice_run_once() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .args(["-s", "build", "build"])
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join("log.txt")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn test_force_reruns_named_task() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .args(["-s", "--force", "build", "build"])
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join("log.txt")).unwrap();
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn test_failed_command_exit_code() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .args(["-s", "fail"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("exit 3"));
}

#[test]
fn test_unknown_task() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .arg("nope")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task 'nope' is not defined"));
}

#[test]
fn test_explicit_file_and_var() {
    let (temp_dir, config_path) = create_test_config(
        r#"
vars:
  word: default
tasks:
  say:
    run: echo ${word} > said.txt
"#,
    );
    let elsewhere = tempfile::TempDir::new().unwrap();

    rmk()
        .current_dir(elsewhere.path())
        .arg("-f")
        .arg(&config_path)
        .args(["-s", "--var", "word=override", "say"])
        .assert()
        .success();

    let said = fs::read_to_string(temp_dir.path().join("said.txt")).unwrap();
    assert_eq!(said.trim(), "override");
}

#[test]
fn test_completions_without_task_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    rmk()
        .current_dir(temp_dir.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rmk"));
}

#[test]
fn test_no_tasks_prints_help() {
    let (temp_dir, _) = create_test_config(TASKS);

    rmk()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"));
}
