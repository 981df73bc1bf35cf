//! Configuration management for cimatrix
//!
//! Settings are loaded from environment variables with defaults, then
//! selectively overridden by command-line flags.
//!
//! # Environment Variables
//!
//! - `CIMATRIX_LANGUAGES_FILE`: language/version document - default: "languages.yaml"
//! - `CIMATRIX_ADDONS_FILE`: addons document - default: "addons.yaml"
//! - `CIMATRIX_OUTPUT_FILE`: JSON file to write the matrix to - default: unset
//! - `CIMATRIX_DEFAULT_BASE_PACKAGES`: fallback `base_packages` - default: "curl git"
//! - `CIMATRIX_APP_URL`: smoke check target - default: "http://app:8080"
//! - `CIMATRIX_REQUEST_TIMEOUT`: smoke check timeout in seconds - default: "10"
//! - `CIMATRIX_SMOKE_RETRIES`: connection retries per smoke check - default: "0"
//! - `CIMATRIX_LOG_LEVEL`: logging level - default: "info"
//! - `CIMATRIX_LOG_JSON`: JSON log lines on stderr (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use cimatrix::CimatrixConfig;
//!
//! let config = CimatrixConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::matrix::DEFAULT_BASE_PACKAGES;
use crate::smoke::DEFAULT_BASE_URL;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LANGUAGES_FILE: &str = "languages.yaml";
const DEFAULT_ADDONS_FILE: &str = "addons.yaml";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SMOKE_RETRIES: u32 = 0;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
const MAX_SMOKE_RETRIES: u32 = 100;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for cimatrix
#[derive(Debug, Clone)]
pub struct CimatrixConfig {
    /// Path to `languages.yaml`
    pub languages_file: PathBuf,

    /// Path to `addons.yaml`
    pub addons_file: PathBuf,

    /// Optional JSON file the matrix is also written to
    pub output_file: Option<PathBuf>,

    /// `base_packages` used when the addons document has none
    pub default_base_packages: String,

    /// Base URL of the service under smoke test
    pub app_url: String,

    /// Smoke check request timeout in seconds
    pub request_timeout_secs: u64,

    /// Connection retries per smoke check
    pub smoke_retries: u32,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for CimatrixConfig {
    /// Loads from `CIMATRIX_*` environment variables, falling back to defaults
    fn default() -> Self {
        let languages_file = env::var("CIMATRIX_LANGUAGES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LANGUAGES_FILE));

        let addons_file = env::var("CIMATRIX_ADDONS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ADDONS_FILE));

        let output_file = env::var("CIMATRIX_OUTPUT_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let default_base_packages = env::var("CIMATRIX_DEFAULT_BASE_PACKAGES")
            .unwrap_or_else(|_| DEFAULT_BASE_PACKAGES.to_string());

        let app_url =
            env::var("CIMATRIX_APP_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = env::var("CIMATRIX_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let smoke_retries = env::var("CIMATRIX_SMOKE_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_SMOKE_RETRIES);

        let log_level = env::var("CIMATRIX_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("CIMATRIX_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            languages_file,
            addons_file,
            output_file,
            default_base_packages,
            app_url,
            request_timeout_secs,
            smoke_retries,
            log_level,
            log_json,
        }
    }
}

impl CimatrixConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if the timeout, retry count,
    /// log level or app URL is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(format!(
                "Request timeout cannot exceed {} seconds",
                MAX_REQUEST_TIMEOUT_SECS
            )));
        }

        if self.smoke_retries > MAX_SMOKE_RETRIES {
            return Err(ConfigError::ValidationFailed(format!(
                "Smoke retries cannot exceed {}",
                MAX_SMOKE_RETRIES
            )));
        }

        if !(self.app_url.starts_with("http://") || self.app_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "App URL must start with http:// or https://: {}",
                self.app_url
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert(
            "languages_file".to_string(),
            self.languages_file.display().to_string(),
        );
        map.insert(
            "addons_file".to_string(),
            self.addons_file.display().to_string(),
        );
        if let Some(ref output) = self.output_file {
            map.insert("output_file".to_string(), output.display().to_string());
        }
        map.insert(
            "default_base_packages".to_string(),
            self.default_base_packages.clone(),
        );
        map.insert("app_url".to_string(), self.app_url.clone());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("smoke_retries".to_string(), self.smoke_retries.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());

        map
    }
}

impl fmt::Display for CimatrixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cimatrix Configuration:")?;
        writeln!(f, "  Languages File: {}", self.languages_file.display())?;
        writeln!(f, "  Addons File: {}", self.addons_file.display())?;
        match self.output_file {
            Some(ref output) => writeln!(f, "  Output File: {}", output.display())?,
            None => writeln!(f, "  Output File: (stdout only)")?,
        }
        writeln!(f, "  Default Base Packages: {}", self.default_base_packages)?;
        writeln!(f, "  App URL: {}", self.app_url)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Smoke Retries: {}", self.smoke_retries)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  JSON Logs: {}", self.log_json)?;
        Ok(())
    }
}
