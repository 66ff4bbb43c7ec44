use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to write a files-backend config into a temp directory
fn create_cli_test_environment() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_path = temp_dir.path().join("wren.json");
    let config = serde_json::json!({
        "backend": "files",
        "notes_dir": temp_dir.path().join("notes"),
        "done_dir": temp_dir.path().join("done"),
    });
    std::fs::write(&config_path, config.to_string()).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Helper function to create a Command with --no-color flag for testing
fn wren_cmd(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("wren").expect("Failed to find wren binary");
    cmd.arg("--no-color")
        .arg("--config-file")
        .arg(config_path);
    cmd
}

#[test]
fn test_cli_add_task_success() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "Water", "plants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task \"Water plants\""));
}

#[test]
fn test_cli_add_task_from_stdin() {
    let (temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .arg("add")
        .write_stdin("Buy milk\nfull fat\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task \"Buy milk\""));

    let body = std::fs::read_to_string(temp_dir.path().join("notes/Buy milk")).unwrap();
    assert_eq!(body, "full fat\n");
}

#[test]
fn test_cli_add_cron_task_substitutes_wildcards() {
    let (temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "0", "9", "*", "*", "*", "Water", "plants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 9 ＊ ＊ ＊ Water plants"));

    assert!(temp_dir.path().join("notes/0 9 ＊ ＊ ＊ Water plants").exists());
}

#[test]
fn test_cli_list_strips_schedule_prefixes() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "0", "9", "*", "*", "*", "Water", "plants"])
        .assert()
        .success();

    wren_cmd(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Water plants"))
        .stdout(predicate::str::contains("＊").not());
}

#[test]
fn test_cli_list_is_the_default_command() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks pending."));
}

#[test]
fn test_cli_list_hides_future_dated_tasks() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "2998-06-01", "Distant", "deadline"])
        .assert()
        .success();
    wren_cmd(&config_path)
        .args(["add", "1990-06-01", "Long", "overdue"])
        .assert()
        .success();

    wren_cmd(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Long overdue"))
        .stdout(predicate::str::contains("Distant deadline").not());
}

#[test]
fn test_cli_show_task_content() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .arg("add")
        .write_stdin("Buy milk\nfull fat")
        .assert()
        .success();

    wren_cmd(&config_path)
        .args(["show", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("full fat"));
}

#[test]
fn test_cli_done_moves_task() {
    let (temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "Buy", "milk"])
        .assert()
        .success();

    wren_cmd(&config_path)
        .args(["done", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked \"Buy milk\" as done"));

    assert!(!temp_dir.path().join("notes/Buy milk").exists());
    assert!(temp_dir.path().join("done/Buy milk").exists());
}

#[test]
fn test_cli_done_ambiguous_lookup_is_a_message() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["add", "Water", "plants"])
        .assert()
        .success();
    wren_cmd(&config_path)
        .args(["add", "Re-pot", "the", "plants"])
        .assert()
        .success();

    wren_cmd(&config_path)
        .args(["done", "plant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Multiple matching files found."));
}

#[test]
fn test_cli_done_miss_is_a_message() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["done", "laundry"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: No matching file for 'laundry' found.",
        ));
}

#[test]
fn test_cli_command_aliases() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .args(["a", "Water", "plants"])
        .assert()
        .success();
    wren_cmd(&config_path)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("- Water plants"));
    wren_cmd(&config_path)
        .args(["s", "water"])
        .assert()
        .success();
    wren_cmd(&config_path)
        .args(["d", "water"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as done"));
}

#[test]
fn test_cli_summary_requires_openai_token() {
    let (_temp_dir, config_path) = create_cli_test_environment();

    wren_cmd(&config_path)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OpenAI token"));
}

#[test]
fn test_cli_todoist_backend_requires_token() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wren.json");
    std::fs::write(&config_path, r#"{"backend": "todoist"}"#).unwrap();

    wren_cmd(&config_path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Todoist backend requires Todoist API Token"));
}
