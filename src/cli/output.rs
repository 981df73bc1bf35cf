//! Output formatting for multiple formats
//!
//! Renders matrices, smoke reports and configuration as JSON, YAML or
//! human-readable text.

use anyhow::{Context, Result};

use crate::config::CimatrixConfig;
use crate::matrix::MatrixDocument;
use crate::smoke::SmokeReport;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_matrix(&self, matrix: &MatrixDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => matrix
                .to_pretty_json()
                .context("Failed to serialize matrix to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(matrix).context("Failed to serialize matrix to YAML")
            }
            OutputFormat::Human => Ok(self.format_matrix_human(matrix)),
        }
    }

    pub fn format_smoke(&self, report: &SmokeReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize smoke report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize smoke report to YAML")
            }
            OutputFormat::Human => Ok(self.format_smoke_human(report)),
        }
    }

    pub fn format_config(&self, config: &CimatrixConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_matrix_human(&self, matrix: &MatrixDocument) -> String {
        let mut output = String::new();

        output.push_str(&format!("CI Build Matrix ({} entries)\n", matrix.len()));
        output.push_str(RULE);
        output.push_str("\n\n");

        if matrix.is_empty() {
            output.push_str("(no entries)\n");
            return output;
        }

        let lang_width = matrix
            .include
            .iter()
            .map(|e| e.language.len() + e.version.len() + 1)
            .max()
            .unwrap_or(0);
        let image_width = matrix
            .include
            .iter()
            .map(|e| e.base_image.len())
            .max()
            .unwrap_or(0);

        for entry in &matrix.include {
            let label = format!("{} {}", entry.language, entry.version);
            output.push_str(&format!(
                "{:<lw$}  {:<iw$}",
                label,
                entry.base_image,
                lw = lang_width,
                iw = image_width
            ));
            if !entry.packages.is_empty() {
                output.push_str(&format!("  packages: {}", entry.packages));
            }
            if let Some(ref base) = entry.base_packages {
                if !base.is_empty() {
                    output.push_str(&format!("  base: {}", base));
                }
            }
            output.push_str("\n");
        }

        output
    }

    fn format_smoke_human(&self, report: &SmokeReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Smoke Checks: {}\n", report.base_url));
        output.push_str(RULE);
        output.push_str("\n\n");

        for check in &report.checks {
            let symbol = if check.passed { "\u{2713}" } else { "\u{2717}" };
            output.push_str(&format!("{} {:<10} {}\n", symbol, check.name, check.message));
            output.push_str(&format!("  \u{2514}\u{2500} {}\n", check.url));
            if let Some(ref details) = check.details {
                output.push_str(&format!("     {}\n", details));
            }
        }

        output.push('\n');
        let failed = report.failures().count();
        if failed == 0 {
            output.push_str("All checks passed\n");
        } else {
            output.push_str(&format!("{} of {} checks failed\n", failed, report.checks.len()));
        }

        output
    }
}
