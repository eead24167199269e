//! Integration tests for the taskdeck CLI.
//!
//! These tests run the built binary in temporary directories and check
//! end-to-end behavior of every command group.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{add_task, create_project, json_of, run_taskdeck_in_dir, stdout_of};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with an initialized workspace
#[fixture]
fn initialized_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_taskdeck_in_dir(temp.path(), &["init", "--quiet"]);
    assert!(
        output.status.success(),
        "Failed to initialize taskdeck: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp
}

// ============================================================================
// Help, Version and Init
// ============================================================================

#[rstest]
fn help_lists_commands(temp_dir: TempDir) {
    let stdout = stdout_of(temp_dir.path(), &["--help"]);
    for command in ["init", "project", "task", "board", "metrics", "compare", "export"] {
        assert!(stdout.contains(command), "help is missing '{command}'");
    }
}

#[rstest]
fn version_is_printed(temp_dir: TempDir) {
    let stdout = stdout_of(temp_dir.path(), &["--version"]);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
fn init_creates_workspace(temp_dir: TempDir) {
    let stdout = stdout_of(temp_dir.path(), &["init", "--key", "team"]);

    assert!(stdout.contains("Initialized taskdeck"));
    assert!(temp_dir.path().join(".taskdeck/config.yaml").is_file());
    assert!(temp_dir.path().join(".taskdeck/data").is_dir());
}

#[rstest]
fn init_twice_fails(initialized_dir: TempDir) {
    let output = run_taskdeck_in_dir(initialized_dir.path(), &["init"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already initialized"));
}

#[rstest]
fn commands_require_workspace(temp_dir: TempDir) {
    let output = run_taskdeck_in_dir(temp_dir.path(), &["project", "list"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not a taskdeck workspace"));
}

// ============================================================================
// Projects
// ============================================================================

#[rstest]
fn project_lifecycle(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let id = create_project(dir, "Website");

    let listed = json_of(dir, &["project", "list"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Website");
    assert_eq!(listed[0]["team"][0]["name"], "Ada");

    let edited = json_of(
        dir,
        &["project", "edit", &id.to_string(), "--status", "on-hold"],
    );
    assert_eq!(edited["status"], "On Hold");

    let text = stdout_of(dir, &["project", "show", "Website"]);
    assert!(text.contains("Website"));
    assert!(text.contains("On Hold"));
    assert!(text.contains("Ada <ada@example.com>"));

    stdout_of(dir, &["project", "delete", "website"]);
    let listed = json_of(dir, &["project", "list"]);
    assert!(listed.as_array().unwrap().is_empty());
}

#[rstest]
fn unknown_project_is_an_error(initialized_dir: TempDir) {
    let output = run_taskdeck_in_dir(initialized_dir.path(), &["board", "Nope"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Project not found: Nope"));
}

#[rstest]
fn edit_without_changes_fails(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");

    let output = run_taskdeck_in_dir(dir, &["project", "edit", "Website"]);
    assert!(!output.status.success());
}

#[rstest]
fn members_can_be_added_and_removed(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");

    let member = json_of(
        dir,
        &[
            "project",
            "add-member",
            "Website",
            "--name",
            "Grace Hopper",
            "--email",
            "grace@example.com",
        ],
    );
    assert_eq!(
        member["avatar"],
        "https://ui-avatars.com/api/?name=Grace%20Hopper"
    );
    let member_id = member["id"].as_i64().unwrap().to_string();

    let task = json_of(
        dir,
        &[
            "task", "add", "Website", "--title", "Docs", "--due", "2030-01-01", "-a", &member_id,
        ],
    );
    assert_eq!(task["assignees"][0]["id"].as_i64().unwrap().to_string(), member_id);

    stdout_of(dir, &["project", "remove-member", "Website", &member_id]);

    let listed = json_of(dir, &["project", "list"]);
    let project = &listed[0];
    assert_eq!(project["team"].as_array().unwrap().len(), 1);
    assert!(project["tasks"][0]["assignees"].as_array().unwrap().is_empty());
}

// ============================================================================
// Tasks and the board
// ============================================================================

#[rstest]
fn task_moves_across_board(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    let task = add_task(dir, "Website", "Wireframes").to_string();

    let moved = json_of(dir, &["task", "move", "Website", &task, "In Review"]);
    assert_eq!(moved["status"], "In Review");
    assert_eq!(moved["completed"], false);

    let board = json_of(dir, &["board", "Website"]);
    let counts: Vec<i64> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 0, 1, 0]);

    let text = stdout_of(dir, &["board", "Website"]);
    assert!(text.contains("In Review (1)"));
    assert!(text.contains("Wireframes"));
}

#[rstest]
fn invalid_move_target_is_rejected(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    let task = add_task(dir, "Website", "Wireframes").to_string();

    let output = run_taskdeck_in_dir(dir, &["task", "move", "Website", &task, "Blocked"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid status 'Blocked'"));
}

#[rstest]
fn complete_and_reopen_keep_timestamp_in_step(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    let task = add_task(dir, "Website", "Wireframes").to_string();

    let done = json_of(dir, &["task", "complete", "Website", &task]);
    assert_eq!(done["completed"], true);
    assert!(done["completedAt"].is_string());
    assert_eq!(done["status"], "To Do");

    let reopened = json_of(dir, &["task", "reopen", "Website", &task]);
    assert_eq!(reopened["completed"], false);
    assert!(reopened.get("completedAt").is_none());
}

#[rstest]
fn task_update_changes_fields(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    let task = add_task(dir, "Website", "Wireframes").to_string();

    let updated = json_of(
        dir,
        &[
            "task", "update", "Website", &task, "--title", "Mockups", "-p", "high",
        ],
    );

    assert_eq!(updated["title"], "Mockups");
    assert_eq!(updated["priority"], "high");
}

#[rstest]
fn deleting_unknown_task_fails_without_changes(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    add_task(dir, "Website", "Wireframes");

    let output = run_taskdeck_in_dir(dir, &["task", "delete", "Website", "1"]);

    assert!(!output.status.success());
    let listed = json_of(dir, &["project", "list"]);
    let project = &listed[0];
    assert_eq!(project["tasks"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Metrics, comparison and export
// ============================================================================

#[rstest]
fn metrics_report_completion_and_health(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    let first = add_task(dir, "Website", "Wireframes").to_string();
    add_task(dir, "Website", "Copy");
    stdout_of(dir, &["task", "complete", "Website", &first]);

    let metrics = json_of(dir, &["metrics", "Website"]);
    assert_eq!(metrics["totalTasks"], 2);
    assert_eq!(metrics["completionRate"], 50.0);
    assert_eq!(metrics["teamEfficiency"]["topPerformerName"], "Ada");
    assert_eq!(metrics["health"]["factors"].as_array().unwrap().len(), 3);

    let text = stdout_of(dir, &["metrics", "Website"]);
    assert!(text.contains("Completed: 1/2 (50.0%)"));
    assert!(text.contains("Workload Balance"));
}

#[rstest]
fn compare_lists_every_project(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    create_project(dir, "Mobile App");

    let comparison = json_of(dir, &["compare"]);
    let names: Vec<&str> = comparison
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Website", "Mobile App"]);
}

#[rstest]
fn export_writes_report_into_directory(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website Relaunch");
    add_task(dir, "Website Relaunch", "Wireframes");

    let result = json_of(dir, &["export", "Website Relaunch", "-o", "."]);
    let path = std::path::PathBuf::from(result["path"].as_str().unwrap());
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();

    assert!(file_name.starts_with("website-relaunch-"));
    assert!(file_name.ends_with(".json"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(&file_name)).unwrap()).unwrap();
    assert_eq!(report["projectName"], "Website Relaunch");
    assert_eq!(report["summary"]["totalTasks"], 1);
    assert_eq!(report["tasks"][0]["title"], "Wireframes");
}

#[rstest]
fn export_prints_text_report(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    create_project(dir, "Website");
    add_task(dir, "Website", "Wireframes");

    let text = stdout_of(dir, &["export", "Website"]);

    assert!(text.starts_with("Project Report: Website"));
    assert!(text.contains("[ ] Wireframes | To Do | medium | due 2030-01-01"));
}

// ============================================================================
// Resilient loading
// ============================================================================

#[rstest]
fn corrupt_data_warns_and_starts_empty(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    std::fs::write(dir.join(".taskdeck/data/projects.json"), "{broken").unwrap();

    let output = run_taskdeck_in_dir(dir, &["--json", "project", "list"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning:"));
}
