//! Loading of the `languages.yaml` and `addons.yaml` documents
//!
//! Both documents are read into a generic [`serde_yaml::Value`] first and then
//! shape-checked by hand, so a missing top-level key and a malformed value can
//! be reported as different errors. [`serde_yaml::Mapping`] keeps insertion
//! order, which is what keeps the matrix in declaration order.

use super::error::MatrixError;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub const LANGUAGES_KEY: &str = "languages";
pub const ADDONS_KEY: &str = "addons";

/// Reserved addons key holding OS packages shared by every language
pub const BASE_PACKAGES_KEY: &str = "base_packages";

/// Ordered mapping of language name to the versions to build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageVersionMap {
    entries: Vec<(String, Vec<String>)>,
}

impl LanguageVersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language, replacing its versions in place if it already exists
    pub fn with_language<S: Into<String>>(mut self, language: S, versions: &[&str]) -> Self {
        self.insert(
            language.into(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn insert(&mut self, language: String, versions: Vec<String>) {
        match self.entries.iter_mut().find(|(name, _)| *name == language) {
            Some((_, existing)) => *existing = versions,
            None => self.entries.push((language, versions)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(language, versions)| (language.as_str(), versions.as_slice()))
    }

    pub fn versions(&self, language: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, versions)| versions.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (language, version) pairs
    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(|(_, versions)| versions.len()).sum()
    }

    pub fn load(path: &Path) -> Result<Self, MatrixError> {
        let content = read_document(path)?;
        Self::from_yaml_str(&content, path)
    }

    /// Parses `{languages: {<lang>: [<version>, ...]}}`
    ///
    /// `path` is only used for error reporting.
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, MatrixError> {
        let document = parse_document(content, path)?;
        let section = section(&document, LANGUAGES_KEY, path)?;

        let mut map = Self::new();
        for (key, value) in section {
            let language = key_name(key, path)?;
            let versions = scalar_list(value, path, &language)?;
            map.insert(language, versions);
        }

        debug!(
            path = %path.display(),
            languages = map.len(),
            pairs = map.pair_count(),
            "Loaded language versions"
        );
        Ok(map)
    }
}

/// Mapping of language name to addon packages, plus the reserved
/// [`BASE_PACKAGES_KEY`] entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonsMap {
    packages: HashMap<String, Vec<String>>,
}

impl AddonsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages<S: Into<String>>(mut self, key: S, packages: &[&str]) -> Self {
        self.packages
            .insert(key.into(), packages.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.packages.get(key).map(Vec::as_slice)
    }

    /// Space-joined addon packages for `language`, empty when it has none
    pub fn packages_for(&self, language: &str) -> String {
        self.get(language)
            .map(|packages| packages.join(" "))
            .unwrap_or_default()
    }

    /// Space-joined shared OS packages, `None` when absent or empty
    pub fn base_packages(&self) -> Option<String> {
        self.get(BASE_PACKAGES_KEY)
            .filter(|packages| !packages.is_empty())
            .map(|packages| packages.join(" "))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self, MatrixError> {
        let content = read_document(path)?;
        Self::from_yaml_str(&content, path)
    }

    /// Parses `{addons: {<lang>: [<package>, ...], base_packages: [...]}}`
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, MatrixError> {
        let document = parse_document(content, path)?;
        let section = section(&document, ADDONS_KEY, path)?;

        let mut map = Self::new();
        for (key, value) in section {
            let name = key_name(key, path)?;
            let packages = scalar_list(value, path, &name)?;
            map.packages.insert(name, packages);
        }

        debug!(path = %path.display(), entries = map.len(), "Loaded addons");
        Ok(map)
    }
}

fn read_document(path: &Path) -> Result<String, MatrixError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => MatrixError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MatrixError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn parse_document(content: &str, path: &Path) -> Result<Value, MatrixError> {
    serde_yaml::from_str(content).map_err(|source| MatrixError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn section<'a>(document: &'a Value, key: &str, path: &Path) -> Result<&'a Mapping, MatrixError> {
    let value = document
        .as_mapping()
        .and_then(|root| root.get(key))
        .ok_or_else(|| MatrixError::MissingKey {
            path: path.to_path_buf(),
            key: key.to_string(),
        })?;

    value.as_mapping().ok_or_else(|| MatrixError::InvalidShape {
        path: path.to_path_buf(),
        message: format!("'{}' must be a mapping", key),
    })
}

fn key_name(key: &Value, path: &Path) -> Result<String, MatrixError> {
    key.as_str()
        .map(str::to_string)
        .ok_or_else(|| MatrixError::InvalidShape {
            path: path.to_path_buf(),
            message: format!("expected a string key, found {:?}", key),
        })
}

/// Reads a YAML list of scalars as strings; `null` counts as an empty list
fn scalar_list(value: &Value, path: &Path, name: &str) -> Result<Vec<String>, MatrixError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        _ => {
            return Err(MatrixError::InvalidShape {
                path: path.to_path_buf(),
                message: format!("'{}' must be a list", name),
            })
        }
    };

    items
        .iter()
        .map(|item| {
            scalar_to_string(item).ok_or_else(|| MatrixError::InvalidShape {
                path: path.to_path_buf(),
                message: format!("'{}' contains a non-scalar item: {:?}", name, item),
            })
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
