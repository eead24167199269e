//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the taskdeck binary in `dir` with plain, uncolored output.
pub fn run_taskdeck_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taskdeck"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("TASKDECK_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute taskdeck binary")
}

/// Run a command that must succeed and return its stdout.
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_taskdeck_in_dir(dir, args);
    assert!(
        output.status.success(),
        "taskdeck {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run a command with `--json` and parse its stdout.
pub fn json_of(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = stdout_of(dir, &full);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

/// Create a project and return its ID.
pub fn create_project(dir: &Path, name: &str) -> i64 {
    let project = json_of(
        dir,
        &[
            "project",
            "create",
            "--name",
            name,
            "-D",
            "Integration test project",
            "--deadline",
            "2030-01-01",
            "-m",
            "Ada:ada@example.com:Lead",
        ],
    );
    project["id"].as_i64().expect("project id")
}

/// Add a task to a project and return its ID.
pub fn add_task(dir: &Path, project: &str, title: &str) -> i64 {
    let task = json_of(
        dir,
        &[
            "task", "add", project, "--title", title, "--due", "2030-01-01",
        ],
    );
    task["id"].as_i64().expect("task id")
}
