#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("SCHEDULE_LAYOUT_LOG", "error")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_compute_reports_critical_path() {
    run_cli(
        "add A Excavate 20\nadd B Structure 90 A\nadd C Services 30 A\nadd D Handover 5 B,C\ncompute\nquit\n",
    )
    .success()
    .stdout(str_contains("duration=115"))
    .stdout(str_contains("crit_path=A->B->D"))
    .stdout(str_contains("waits=1"));
}

#[test]
fn cli_links_shows_free_float_edge() {
    run_cli("add A Excavate 20\nadd B Structure 90 A\nadd C Services 30 A\nadd D Handover 5 B,C\nlinks\nquit\n")
        .success()
        .stdout(str_contains("free_float"));
}

#[test]
fn cli_delete_command_removes_activity() {
    run_cli("add 1 TaskA 5\nadd 2 TaskB 3 1\ndelete 2\nquit\n")
        .success()
        .stdout(str_contains("Deleted activity 2."));
}

#[test]
fn cli_reports_cycles() {
    run_cli("add A First 1 B\nadd B Second 1 A\ncompute\nquit\n")
        .success()
        .stdout(str_contains("Analysis error: predecessor cycle detected"));
}

#[test]
fn cli_rejects_negative_duration() {
    run_cli("add A Bad -3\nquit\n")
        .success()
        .stdout(str_contains("invalid duration"));
}

#[test]
fn cli_zone_command_changes_layout() {
    run_cli("add A Dig 2\nadd B Pour 2\nzone B Basement\nlayout\nquit\n")
        .success()
        .stdout(str_contains("Zone updated for B."))
        .stdout(str_contains("Basement"));
}

#[test]
fn cli_meta_start_validates_dates() {
    run_cli("meta start 2025-13-40\nmeta start 2025-02-03\nmeta show\nquit\n")
        .success()
        .stdout(str_contains("Invalid date (YYYY-MM-DD)"))
        .stdout(str_contains("Project start date : 2025-02-03"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "add 1 TaskPersist 4\nsave json {}\nadd 2 Temp 1\nload json {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Schedule loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output
        .split("Schedule loaded from")
        .last()
        .unwrap_or_default();
    assert!(after_reload.contains("TaskPersist"));
    assert!(
        !after_reload.contains("Temp"),
        "activity added after save should be gone"
    );
}

#[test]
fn cli_save_and_load_csv_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "add 1 Frame 4\nadd 2 Roof 2 1\nsave csv {}\ndelete 2\nload csv {}\ncompute\nquit\n",
        path, path
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Schedule saved to"))
        .stdout(str_contains("crit_path=1->2"));
}

#[test]
fn cli_unknown_command_hint() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}
