use serde::{Deserialize, Serialize};
use std::fmt;

/// One CI job configuration: a single (language, version) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub language: String,
    pub version: String,
    /// Container image the job starts from (e.g. "python:3.11")
    pub base_image: String,
    /// Space-separated OS packages shared by every job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_packages: Option<String>,
    /// Space-separated language-specific addon packages, empty when none
    pub packages: String,
}

/// The matrix artifact, shaped the way GitHub Actions expects `strategy.matrix`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDocument {
    pub include: Vec<MatrixEntry>,
}

impl MatrixDocument {
    pub fn new(include: Vec<MatrixEntry>) -> Self {
        Self { include }
    }

    pub fn len(&self) -> usize {
        self.include.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Entries for one language, in declaration order
    pub fn entries_for<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a MatrixEntry> {
        self.include.iter().filter(move |e| e.language == language)
    }

    /// Single-line JSON, as written to `GITHUB_ENV`
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON, as printed to stdout and written to `matrix.json`
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MatrixEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.language, self.version, self.base_image)
    }
}
