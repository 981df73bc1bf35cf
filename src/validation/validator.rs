use crate::matrix::MatrixDocument;
use crate::validation::rules::{
    ImageReferenceRule, NonEmptyFieldsRule, UniqueEntriesRule, ValidationRule,
};
use anyhow::Result;

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, matrix: &MatrixDocument) -> Result<()> {
        for rule in &self.rules {
            if let Err(e) = rule.validate(matrix) {
                anyhow::bail!("[{}] {}", rule.name(), e);
            }
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(NonEmptyFieldsRule),
                Box::new(UniqueEntriesRule),
                Box::new(ImageReferenceRule),
            ],
        }
    }
}
