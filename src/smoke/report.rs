use serde::{Deserialize, Serialize};

/// Result of a single smoke check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Short check name ("health", "database")
    pub name: String,
    /// URL that was requested
    pub url: String,
    pub passed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CheckOutcome {
    pub fn passed(name: &str, url: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            passed: true,
            message,
            details: None,
        }
    }

    pub fn failed(name: &str, url: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            passed: false,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// All check outcomes for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmokeReport {
    pub base_url: String,
    pub checks: Vec<CheckOutcome>,
}

impl SmokeReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn get(&self, name: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.name == name)
    }
}
