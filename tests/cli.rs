// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::str::contains;

fn cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("agentlint").unwrap();
    cmd.current_dir(dir);
    cmd
}

const GUIDE: &str = r#"# Commit Guide

## Decision Rules

### Mandatory

- Commit type must be one of `feat`, `fix`

### Prohibited

- `@Data` on persistence entities
"#;

#[test]
fn check_valid_message() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["check", "fix(parser): handle trailing comma"])
        .assert()
        .success()
        .stdout(contains("fix(parser)"));
}

#[test]
fn check_breaking_footer_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("check")
        .write_stdin(
            "feat: allow provided config object to extend other configs\n\nBREAKING CHANGE: extends key now used for extending other config files",
        )
        .assert()
        .success();
}

#[test]
fn check_malformed_subject_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["check", "update parser handling"])
        .assert()
        .failure()
        .stdout(contains("commit-subject"))
        .stdout(contains("malformed subject"));
}

#[test]
fn check_unknown_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["check", "yolo: ship it"])
        .assert()
        .failure()
        .stdout(contains("commit-type"));
}

#[test]
fn check_strict_promotes_info() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["check", "feat: Add the scanner", "--strict"])
        .assert()
        .failure()
        .stdout(contains("subject-case"));
}

#[test]
fn check_json_output() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["--format", "json", "check", "update parser handling"])
        .assert()
        .failure()
        .stdout(contains("\"rule\""))
        .stdout(contains("commit-subject"));
}

#[test]
fn check_empty_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("check")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(contains("empty"));
}

#[test]
fn check_message_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("COMMIT_EDITMSG");
    std::fs::write(&path, "feat(scan): add tree walking\n").unwrap();

    cmd(dir.path())
        .args(["check", "--file", "COMMIT_EDITMSG"])
        .assert()
        .success();
}

#[test]
fn check_against_policy_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("AGENTS.md"), GUIDE).unwrap();

    // "docs" is allowed by default but not by the document's type rule.
    cmd(dir.path())
        .args(["--policy", "AGENTS.md", "check", "docs: update readme"])
        .assert()
        .failure()
        .stdout(contains("mandatory-1"));
}

#[test]
fn scan_flags_prohibited_pattern() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Order.java"),
        "@Data\n@Entity\npublic class Order {}\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["scan", "Order.java"])
        .assert()
        .failure()
        .stdout(contains("lombok-data"));
}

#[test]
fn scan_clean_file_passes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Order.java"),
        "public class Order { private long id; }\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["scan", "Order.java"])
        .assert()
        .success()
        .stdout(contains("0 violation"));
}

#[test]
fn scan_tree_visits_configured_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("Order.java"), "@Data\nclass Order {}\n").unwrap();
    std::fs::write(src.join("notes.md"), "@Data is discussed here\n").unwrap();

    cmd(dir.path())
        .args(["scan", "src"])
        .assert()
        .failure()
        .stdout(contains("Order.java"))
        .stdout(contains("1 target(s)"));
}

#[test]
fn rules_lists_policy_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("AGENTS.md"), GUIDE).unwrap();

    cmd(dir.path())
        .args(["--policy", "AGENTS.md", "rules"])
        .assert()
        .success()
        .stdout(contains("Commit Guide"))
        .stdout(contains("mandatory-1"))
        .stdout(contains("prohibited-1"));
}

#[test]
fn rules_without_policy_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("rules")
        .assert()
        .failure()
        .stderr(contains("no policy document"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    cmd(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("agentlint.toml").exists());

    cmd(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("already exists"));

    cmd(dir.path()).args(["init", "--force"]).assert().success();
}
