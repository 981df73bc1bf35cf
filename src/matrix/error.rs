use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading matrix inputs or writing matrix outputs
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Input document does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input document exists but could not be read
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input document is not valid YAML
    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Required top-level key is absent
    #[error("Missing top-level key '{key}' in {}", path.display())]
    MissingKey { path: PathBuf, key: String },

    /// Key is present but its value has the wrong structure
    #[error("Invalid structure in {}: {message}", path.display())]
    InvalidShape { path: PathBuf, message: String },

    /// Output could not be written
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize matrix")]
    Serialize(#[from] serde_json::Error),

    /// `--github-env` was requested outside a GitHub Actions runner
    #[error("GITHUB_ENV environment variable is not set")]
    GithubEnvUnset,
}

impl MatrixError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MatrixError::FileNotFound { .. })
    }
}
