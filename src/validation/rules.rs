use crate::matrix::MatrixDocument;
use anyhow::Result;
use std::collections::HashSet;

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, matrix: &MatrixDocument) -> Result<()>;
}

pub struct UniqueEntriesRule;

impl ValidationRule for UniqueEntriesRule {
    fn name(&self) -> &'static str {
        "UniqueEntries"
    }

    fn validate(&self, matrix: &MatrixDocument) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &matrix.include {
            if !seen.insert((entry.language.as_str(), entry.version.as_str())) {
                anyhow::bail!(
                    "Duplicate matrix entry: {} {}",
                    entry.language,
                    entry.version
                );
            }
        }
        Ok(())
    }
}

pub struct NonEmptyFieldsRule;

impl ValidationRule for NonEmptyFieldsRule {
    fn name(&self) -> &'static str {
        "NonEmptyFields"
    }

    fn validate(&self, matrix: &MatrixDocument) -> Result<()> {
        for (i, entry) in matrix.include.iter().enumerate() {
            if entry.language.trim().is_empty() {
                anyhow::bail!("Entry {} has an empty language", i);
            }
            if entry.version.trim().is_empty() {
                anyhow::bail!("Entry {} ({}) has an empty version", i, entry.language);
            }
            if entry.base_image.is_empty() {
                anyhow::bail!("Entry {} ({}) has an empty base image", i, entry.language);
            }
        }
        Ok(())
    }
}

pub struct ImageReferenceRule;

impl ValidationRule for ImageReferenceRule {
    fn name(&self) -> &'static str {
        "ImageReference"
    }

    fn validate(&self, matrix: &MatrixDocument) -> Result<()> {
        for entry in &matrix.include {
            let image = &entry.base_image;
            if image.chars().any(char::is_whitespace) {
                anyhow::bail!("Image reference '{}' contains whitespace", image);
            }
            // the tag follows the last ':'; earlier ones belong to a registry port
            match image.rsplit_once(':') {
                Some((name, tag)) if !name.is_empty() && !tag.is_empty() && !tag.contains('/') => {}
                _ => anyhow::bail!("Image reference '{}' is not of the form name:tag", image),
            }
        }
        Ok(())
    }
}
