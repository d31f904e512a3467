//! CLI binary integration tests.
//!
//! These tests exercise the compiled `sctl` binary for the commands that
//! never touch the KMS, verifying routing, store handling, and exit codes.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the compiled `sctl` binary in the workspace target directory.
///
/// Cargo sets `CARGO_MANIFEST_DIR` to the manifest directory of the package
/// being tested. We navigate up to the workspace root and look inside
/// `target/debug/`.
fn sctl_bin() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir
        .parent()
        .expect("tests/ parent")
        .parent()
        .expect("workspace root");
    let bin = workspace_root.join("target").join("debug").join("sctl");
    assert!(
        bin.exists(),
        "sctl binary not found at {}; run `cargo build -p sctl-cli` first",
        bin.display()
    );
    bin
}

fn sctl_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(sctl_bin());
    cmd.current_dir(dir.path()).env_remove("SCTL_KEY");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = sctl_cmd(&dir).arg("--help").output().expect("failed to run sctl");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["add", "rm", "list", "run"] {
        assert!(
            stdout.contains(command),
            "help output should mention '{}', got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_list_without_store_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let output = sctl_cmd(&dir).arg("list").output().expect("failed to run sctl");
    assert!(output.status.success(), "list on an empty directory should succeed");
    assert!(output.stdout.is_empty(), "no secrets means no output");
}

#[test]
fn test_list_sorted_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".scuttle.json"),
        r#"[
  { "name": "ZETA", "cypher": "eg==", "created": "2019-05-01T13:01:27Z" },
  { "name": "ALPHA", "cypher": "YQ==", "created": "2019-05-01T13:01:27Z" }
]"#,
    )
    .unwrap();

    let output = sctl_cmd(&dir).arg("list").output().expect("failed to run sctl");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "ALPHA\nZETA\n");
}

#[test]
fn test_list_corrupt_store_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".scuttle.json"), "not json at all").unwrap();

    let output = sctl_cmd(&dir).arg("list").output().expect("failed to run sctl");
    assert!(
        !output.status.success(),
        "a corrupt store must fail, not list as empty"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Corrupt store"),
        "diagnostic should name the corrupt store, got: {}",
        stderr
    );
}

#[test]
fn test_rm_absent_name_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = sctl_cmd(&dir)
        .args(["rm", "NEVER_EXISTED"])
        .output()
        .expect("failed to run sctl");
    assert!(output.status.success(), "rm of an absent name is a no-op");
}

#[test]
fn test_rm_removes_record() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".scuttle.json"),
        r#"[ { "name": "DOOMED", "cypher": "eg==", "created": "2019-05-01T13:01:27Z" } ]"#,
    )
    .unwrap();

    let output = sctl_cmd(&dir)
        .args(["rm", "doomed"])
        .output()
        .expect("failed to run sctl");
    assert!(output.status.success());

    let output = sctl_cmd(&dir).arg("list").output().expect("failed to run sctl");
    assert!(output.stdout.is_empty(), "record should be gone after rm");
}

#[test]
fn test_run_without_key_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = sctl_cmd(&dir)
        .args(["run", "env"])
        .output()
        .expect("failed to run sctl");
    assert!(!output.status.success(), "run without a key reference must fail");
}

#[test]
fn test_store_flag_overrides_location() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("elsewhere.json");
    std::fs::write(
        &store_path,
        r#"[ { "name": "MOVED", "cypher": "eg==", "created": "2019-05-01T13:01:27Z" } ]"#,
    )
    .unwrap();

    let output = sctl_cmd(&dir)
        .args(["list", "--store", store_path.to_str().unwrap()])
        .output()
        .expect("failed to run sctl");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "MOVED\n");
}
