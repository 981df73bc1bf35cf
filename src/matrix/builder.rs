use super::error::MatrixError;
use super::source::{AddonsMap, LanguageVersionMap};
use super::types::{MatrixDocument, MatrixEntry};
use std::path::Path;
use tracing::{debug, info};

/// Fallback for `base_packages` when the addons document has none
pub const DEFAULT_BASE_PACKAGES: &str = "curl git";

/// Container image for a (language, version) pair
///
/// Java is the only language whose official image is not named after it.
pub fn base_image_for(language: &str, version: &str) -> String {
    if language == "java" {
        format!("openjdk:{}-jdk-bullseye", version)
    } else {
        format!("{}:{}", language, version)
    }
}

/// Expands a [`LanguageVersionMap`] and an [`AddonsMap`] into a [`MatrixDocument`]
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    languages: LanguageVersionMap,
    addons: AddonsMap,
    base_packages_default: Option<String>,
}

impl MatrixBuilder {
    pub fn new(languages: LanguageVersionMap, addons: AddonsMap) -> Self {
        Self {
            languages,
            addons,
            base_packages_default: None,
        }
    }

    /// Loads both documents; the languages file is read first
    pub fn from_files(languages: &Path, addons: &Path) -> Result<Self, MatrixError> {
        let languages = LanguageVersionMap::load(languages)?;
        let addons = AddonsMap::load(addons)?;
        Ok(Self::new(languages, addons))
    }

    /// Adds `base_packages` to every entry, using `fallback` when the addons
    /// document has no non-empty `base_packages` list
    pub fn with_base_packages<S: Into<String>>(mut self, fallback: S) -> Self {
        self.base_packages_default = Some(fallback.into());
        self
    }

    pub fn languages(&self) -> &LanguageVersionMap {
        &self.languages
    }

    pub fn addons(&self) -> &AddonsMap {
        &self.addons
    }

    pub fn build(&self) -> MatrixDocument {
        let base_packages = self
            .base_packages_default
            .as_ref()
            .map(|fallback| self.addons.base_packages().unwrap_or_else(|| fallback.clone()));

        let mut include = Vec::with_capacity(self.languages.pair_count());
        for (language, versions) in self.languages.iter() {
            let packages = self.addons.packages_for(language);
            debug!(language, versions = versions.len(), packages = %packages, "Expanding language");

            for version in versions {
                include.push(MatrixEntry {
                    language: language.to_string(),
                    version: version.clone(),
                    base_image: base_image_for(language, version),
                    base_packages: base_packages.clone(),
                    packages: packages.clone(),
                });
            }
        }

        info!(
            languages = self.languages.len(),
            entries = include.len(),
            "Built matrix"
        );
        MatrixDocument::new(include)
    }
}
