//! Output destinations for a built matrix

use super::error::MatrixError;
use super::types::MatrixDocument;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const GITHUB_ENV_VAR: &str = "GITHUB_ENV";
pub const MATRIX_ENV_NAME: &str = "MATRIX";

/// Matrix JSON written to a temp file next to its target, not yet visible
/// at the target path
///
/// Dropping it without [`StagedJsonFile::commit`] removes the temp file.
pub struct StagedJsonFile {
    tmp: NamedTempFile,
    path: PathBuf,
    entries: usize,
}

impl StagedJsonFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically renames the temp file onto the target path
    pub fn commit(self) -> Result<(), MatrixError> {
        let path = self.path;
        self.tmp
            .persist(&path)
            .map_err(|e| MatrixError::Write {
                path: path.clone(),
                source: e.error,
            })?;

        info!(path = %path.display(), entries = self.entries, "Wrote matrix file");
        Ok(())
    }
}

/// Writes pretty JSON to a sibling temp file of `path` without touching `path`
pub fn stage_json_file(
    document: &MatrixDocument,
    path: &Path,
) -> Result<StagedJsonFile, MatrixError> {
    let json = document.to_pretty_json()?;
    let write_err = |source: std::io::Error| MatrixError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    Ok(StagedJsonFile {
        tmp,
        path: path.to_path_buf(),
        entries: document.len(),
    })
}

/// Writes pretty JSON to `path` through a sibling temp file and an atomic
/// rename, so readers never see a half-written file
pub fn write_json_file(document: &MatrixDocument, path: &Path) -> Result<(), MatrixError> {
    stage_json_file(document, path)?.commit()
}

/// `MATRIX=<compact json>\n`
pub fn github_env_line(document: &MatrixDocument) -> Result<String, MatrixError> {
    Ok(format!("{}={}\n", MATRIX_ENV_NAME, document.to_compact_json()?))
}

/// Path of the GitHub Actions environment file, if running inside a runner
pub fn github_env_path() -> Option<PathBuf> {
    env::var_os(GITHUB_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Appends the matrix line to the environment file at `path`, creating it if needed
pub fn append_github_env(document: &MatrixDocument, path: &Path) -> Result<(), MatrixError> {
    let line = github_env_line(document)?;
    let write_err = |source: std::io::Error| MatrixError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(line.as_bytes()).map_err(write_err)?;

    info!(path = %path.display(), "Appended {} to GitHub environment file", MATRIX_ENV_NAME);
    Ok(())
}
