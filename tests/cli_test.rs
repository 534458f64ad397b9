use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rehabilitation"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("exercises"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_rehabconnect"));
}

#[test]
fn test_exercises_list() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["exercises", "list"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Knee Flexion Stretch"))
        .stdout(predicate::str::contains("Wall Push-Ups"))
        .stdout(predicate::str::contains("Single Leg Balance"));
}

#[test]
fn test_exercises_list_with_filters() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["exercises", "list", "--category", "balance"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Single Leg Balance"))
        .stdout(predicate::str::contains("Knee Flexion Stretch").not());
}

#[test]
fn test_exercises_list_rejects_bad_category() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["exercises", "list", "--category", "cardio"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid exercise category"));
}

#[test]
fn test_exercises_show() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["exercises", "show", "exercise_001"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Knee Flexion Stretch"))
        .stdout(predicate::str::contains("Sit on edge of chair"));
}

#[test]
fn test_exercises_show_unknown_id_fails() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["exercises", "show", "exercise_999"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_achievements_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("achievements");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("First Steps"))
        .stdout(predicate::str::contains("Week Warrior"));
}

#[test]
fn test_patients_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("patients");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sarah Martinez"))
        .stdout(predicate::str::contains("Michael Chen"));
}

#[test]
fn test_support_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("support");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dr. Jennifer Walsh"))
        .stdout(predicate::str::contains("How does motion tracking work?"));
}

#[test]
fn test_progress_command() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.arg("progress");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sarah Martinez"))
        .stdout(predicate::str::contains("Range of motion"));
}

#[test]
fn test_config_init_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut init = Command::cargo_bin("rehabconnect").unwrap();
    init.env("REHABCONNECT_CONFIG_DIR", temp_dir.path())
        .args(["config", "init"]);
    init.assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    let mut show = Command::cargo_bin("rehabconnect").unwrap();
    show.env("REHABCONNECT_CONFIG_DIR", temp_dir.path())
        .args(["config", "show"]);
    show.assert()
        .success()
        .stdout(predicate::str::contains("theme"))
        .stdout(predicate::str::contains("request_camera"));
}

#[test]
fn test_chat_single_message() {
    let mut cmd = Command::cargo_bin("rehabconnect").unwrap();
    cmd.args(["chat", "--message", "how is my progress?"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("RehabBot"));
}
