//! CLI integration tests for jsondb
//!
//! Each test gets its own database directory and an empty config file so
//! the user's configuration never leaks in.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("db")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Command with `--root` pointing at this test's database
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--root").arg(self.root());
        cmd
    }

    /// Command without `--root`
    fn bare_cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("jsondb"));
        cmd.env_remove("JSONDB_ROOT")
            .env_remove("RUST_LOG")
            .env("JSONDB_CONFIG", self.config());
        cmd
    }
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_then_reuses() {
    let env = Env::new();

    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created database"));

    assert!(env.root().is_dir());

    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using existing database"));
}

#[test]
fn test_init_json_output() {
    let env = Env::new();

    env.cmd()
        .args(["--format", "json", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"created\":true"));
}

#[test]
fn test_verbose_shows_store_diagnostics() {
    let env = Env::new();

    env.cmd()
        .args(["--verbose", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("creating database at"));
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_write_then_read() {
    let env = Env::new();

    env.cmd()
        .args(["write", "fish", "red", r#"{"type": "red"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote fish/red"));

    let content = fs::read_to_string(env.root().join("fish/red.json")).unwrap();
    assert_eq!(content, "{\n\t\"type\": \"red\"\n}\n");

    env.cmd()
        .args(["--format", "json", "read", "fish", "red"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"type":"red"}"#));
}

#[test]
fn test_write_from_stdin() {
    let env = Env::new();

    env.cmd()
        .args(["write", "fish", "blue"])
        .write_stdin(r#"{"type": "blue"}"#)
        .assert()
        .success();

    env.cmd()
        .args(["read", "fish", "blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"blue\""));
}

#[test]
fn test_write_invalid_json_fails() {
    let env = Env::new();

    env.cmd()
        .args(["write", "fish", "red", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));

    assert!(!env.root().join("fish").exists());
}

#[test]
fn test_write_empty_collection_fails() {
    let env = Env::new();

    env.cmd()
        .args(["write", "", "red", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing collection"));
}

#[test]
fn test_read_missing_fails() {
    let env = Env::new();

    env.cmd()
        .args(["read", "fish", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("not found")));
}

#[test]
fn test_read_all_and_list() {
    let env = Env::new();

    for (name, kind) in [("red", "red"), ("blue", "blue")] {
        env.cmd()
            .args(["write", "fish", name, &format!(r#"{{"type": "{}"}}"#, kind)])
            .assert()
            .success();
    }

    env.cmd()
        .args(["--format", "json", "read-all", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"[{"type":"blue"},{"type":"red"}]"#));

    env.cmd()
        .args(["list", "fish"])
        .assert()
        .success()
        .stdout("blue\nred\n");
}

#[test]
fn test_read_all_absent_collection_is_empty() {
    let env = Env::new();

    env.cmd()
        .args(["--format", "json", "read-all", "fish"])
        .assert()
        .success()
        .stdout("[]\n");
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_record() {
    let env = Env::new();

    env.cmd().args(["write", "fish", "red", "1"]).assert().success();
    env.cmd().args(["write", "fish", "blue", "2"]).assert().success();

    env.cmd()
        .args(["delete", "fish", "red"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted fish/red"));

    assert!(!env.root().join("fish/red.json").exists());
    assert!(env.root().join("fish/blue.json").exists());
}

#[test]
fn test_delete_collection() {
    let env = Env::new();

    env.cmd().args(["write", "fish", "red", "1"]).assert().success();

    env.cmd()
        .args(["delete", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted collection fish"));

    assert!(!env.root().join("fish").exists());
}

#[test]
fn test_delete_missing_fails() {
    let env = Env::new();

    env.cmd()
        .args(["delete", "fish", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_yaml_codec() {
    let env = Env::new();

    env.cmd()
        .args(["--codec", "yaml", "write", "fish", "red", r#"{"type": "red"}"#])
        .assert()
        .success();

    let content = fs::read_to_string(env.root().join("fish/red.yaml")).unwrap();
    assert!(content.contains("type: red"));

    env.cmd()
        .args(["--codec", "yaml", "--format", "json", "read", "fish", "red"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"type":"red"}"#));
}

#[test]
fn test_config_file_supplies_defaults() {
    let env = Env::new();
    let root = env.dir.path().join("configured");
    fs::write(
        env.config(),
        format!("root = {:?}\noutput = \"json\"\n", root.display().to_string()),
    )
    .unwrap();

    env.bare_cmd()
        .args(["write", "fish", "red", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"));

    assert!(root.join("fish/red.json").is_file());
}

#[test]
fn test_root_env_var() {
    let env = Env::new();

    env.bare_cmd()
        .env("JSONDB_ROOT", env.root())
        .args(["write", "fish", "red", "1"])
        .assert()
        .success();

    assert!(env.root().join("fish/red.json").is_file());
}
