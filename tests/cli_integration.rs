//! CLI integration tests
//!
//! Runs the `cimatrix` binary against temporary working directories and checks
//! stdout, written files and exit codes.

mod support;

use cimatrix::MatrixDocument;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use support::{copy_fixture, run_cimatrix};
use tempfile::TempDir;

fn write_inputs(dir: &TempDir, languages: &str, addons: &str) {
    fs::write(dir.path().join("languages.yaml"), languages).unwrap();
    fs::write(dir.path().join("addons.yaml"), addons).unwrap();
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = run_cimatrix(dir.path(), &["--help"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("smoke"));
}

#[test]
fn test_generate_reference_example() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        &dir,
        "languages:\n  python: [\"3.11\"]\n  java: [\"17\"]\n",
        "addons:\n  python: [pip]\n  java: []\n",
    );

    let output = run_cimatrix(dir.path(), &["generate"], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        stdout,
        json!({"include": [
            {"language": "python", "version": "3.11", "base_image": "python:3.11", "packages": "pip"},
            {"language": "java", "version": "17", "base_image": "openjdk:17-jdk-bullseye", "packages": ""}
        ]})
    );
    // stdout only by default
    assert!(!dir.path().join("matrix.json").exists());
}

#[test]
fn test_generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());

    let output = run_cimatrix(dir.path(), &["generate", "--output", "matrix.json"], &[]);
    assert!(output.status.success());

    let file: MatrixDocument =
        serde_json::from_str(&fs::read_to_string(dir.path().join("matrix.json")).unwrap()).unwrap();
    let stdout: MatrixDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(file, stdout);
    assert_eq!(file.len(), 8);
}

#[test]
fn test_generate_appends_github_env() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());
    let env_file = dir.path().join("github_env");
    fs::write(&env_file, "EXISTING=1\n").unwrap();

    let output = run_cimatrix(
        dir.path(),
        &["generate", "--github-env"],
        &[("GITHUB_ENV", env_file.as_path())],
    );
    assert!(output.status.success());

    let content = fs::read_to_string(&env_file).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("EXISTING=1"));
    let matrix_line = lines.next().unwrap();
    let json = matrix_line.strip_prefix("MATRIX=").unwrap();
    let parsed: MatrixDocument = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.len(), 8);
    assert_eq!(lines.next(), None);
}

#[test]
fn test_github_env_flag_without_variable_fails() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());

    let output = run_cimatrix(
        dir.path(),
        &["generate", "--github-env", "-o", "matrix.json"],
        &[],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GITHUB_ENV"));
    assert!(!dir.path().join("matrix.json").exists());
}

#[test]
fn test_generate_with_base_packages() {
    let dir = TempDir::new().unwrap();
    copy_fixture("base-packages", dir.path());

    let output = run_cimatrix(dir.path(), &["generate", "--with-base-packages"], &[]);
    assert!(output.status.success());

    let matrix: MatrixDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matrix.len(), 3);
    assert!(matrix
        .include
        .iter()
        .all(|e| e.base_packages.as_deref() == Some("curl git jq")));
    assert_eq!(matrix.include[0].packages, "bundler");
    assert_eq!(matrix.include[2].base_image, "openjdk:17-jdk-bullseye");
}

#[test]
fn test_base_packages_fallback() {
    let dir = TempDir::new().unwrap();
    write_inputs(&dir, "languages:\n  go: ['1.22']\n", "addons: {}\n");

    let output = run_cimatrix(dir.path(), &["generate", "--with-base-packages"], &[]);
    let matrix: MatrixDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matrix.include[0].base_packages.as_deref(), Some("curl git"));

    let output = run_cimatrix(
        dir.path(),
        &["generate", "--with-base-packages", "--default-base-packages", ""],
        &[],
    );
    let matrix: MatrixDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matrix.include[0].base_packages.as_deref(), Some(""));
}

#[test]
fn test_missing_addons_file_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("languages.yaml"),
        "languages:\n  python: ['3.11']\n",
    )
    .unwrap();

    let output = run_cimatrix(dir.path(), &["generate", "-o", "matrix.json"], &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
    assert!(stderr.contains("addons.yaml"));
    assert!(!dir.path().join("matrix.json").exists());
}

#[test]
fn test_fatal_error_reported_when_rust_log_set() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("languages.yaml"),
        "languages:\n  python: ['3.11']\n",
    )
    .unwrap();

    let output = run_cimatrix(
        dir.path(),
        &["generate"],
        &[("RUST_LOG", Path::new("reqwest=debug"))],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.trim().is_empty());
    assert!(stderr.contains("addons.yaml"), "stderr: {}", stderr);
}

#[test]
fn test_failed_github_env_append_leaves_no_output_file() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());
    let env_dir = dir.path().join("github_env_dir");
    fs::create_dir(&env_dir).unwrap();

    let output = run_cimatrix(
        dir.path(),
        &["generate", "-o", "matrix.json", "--github-env"],
        &[("GITHUB_ENV", env_dir.as_path())],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join("matrix.json").exists());
    // no stray temp files either
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| !name.ends_with(".yaml") && name != "github_env_dir")
        .collect();
    assert!(leftovers.is_empty(), "{:?}", leftovers);
}

#[test]
fn test_failed_run_keeps_previous_output_file() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());
    let previous = "{\"include\": []}\n";
    fs::write(dir.path().join("matrix.json"), previous).unwrap();
    fs::write(dir.path().join("addons.yaml"), "addons: [broken\n").unwrap();

    let output = run_cimatrix(dir.path(), &["generate", "-o", "matrix.json"], &[]);

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("matrix.json")).unwrap(),
        previous
    );
}

#[test]
fn test_missing_top_level_key_fails() {
    let dir = TempDir::new().unwrap();
    write_inputs(&dir, "runtimes:\n  python: ['3.11']\n", "addons: {}\n");

    let output = run_cimatrix(dir.path(), &["generate"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("'languages'"));
}

#[test]
fn test_duplicate_versions_fail_validation() {
    let dir = TempDir::new().unwrap();
    write_inputs(&dir, "languages:\n  node: ['20', '20']\n", "addons: {}\n");

    let output = run_cimatrix(dir.path(), &["generate"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("UniqueEntries"));
}

#[test]
fn test_paths_from_flags_and_env() {
    let dir = TempDir::new().unwrap();
    let ci = dir.path().join("ci");
    fs::create_dir(&ci).unwrap();
    copy_fixture("basic", &ci);

    let output = run_cimatrix(
        dir.path(),
        &["generate", "--languages", "ci/languages.yaml"],
        &[("CIMATRIX_ADDONS_FILE", ci.join("addons.yaml").as_path())],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let matrix: MatrixDocument = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matrix.include[0].packages, "pip setuptools wheel");
}

#[test]
fn test_human_format() {
    let dir = TempDir::new().unwrap();
    copy_fixture("basic", dir.path());

    let output = run_cimatrix(dir.path(), &["generate", "--format", "human"], &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CI Build Matrix (8 entries)"));
    assert!(stdout.contains("openjdk:21-jdk-bullseye"));
}

#[test]
fn test_config_command() {
    let dir = TempDir::new().unwrap();
    let output = run_cimatrix(dir.path(), &["config", "--format", "json"], &[]);
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["languages_file"], "languages.yaml");
    assert_eq!(config["app_url"], "http://app:8080");
    assert_eq!(config["log_json"], "false");
}

#[test]
fn test_smoke_invalid_url_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cimatrix(dir.path(), &["smoke", "--base-url", "app:8080"], &[]);
    assert!(!output.status.success());
}
