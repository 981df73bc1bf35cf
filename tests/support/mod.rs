#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Runs the binary in `dir` with a clean cimatrix/GitHub environment
pub fn run_cimatrix(dir: &Path, args: &[&str], env: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cimatrix"));
    cmd.current_dir(dir).args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("CIMATRIX_") || key == "GITHUB_ENV" || key == "RUST_LOG" {
            cmd.env_remove(key);
        }
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute cimatrix")
}

/// Copies a fixture directory's YAML files into `dest`
pub fn copy_fixture(name: &str, dest: &Path) {
    for entry in fs::read_dir(fixture(name)).expect("fixture dir") {
        let entry = entry.expect("fixture entry");
        fs::copy(entry.path(), dest.join(entry.file_name())).expect("copy fixture");
    }
}
