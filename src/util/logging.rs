//! Structured logging setup for cimatrix
//!
//! Logs always go to stderr: stdout carries the matrix JSON, which CI steps
//! capture and parse.
//!
//! # Example
//!
//! ```no_run
//! use cimatrix::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(languages = 3, "Building matrix");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `cimatrix` targets
    pub level: Level,

    /// Emit JSON lines instead of human-readable text
    pub use_json: bool,

    /// Include the module target (e.g., cimatrix::matrix::builder)
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from CLI flags, then `CIMATRIX_LOG_LEVEL`
    ///
    /// An explicit `--log-level` wins over `-v`/`-q`.
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            let level_str = env::var("CIMATRIX_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        };

        Self {
            level,
            use_json: json_from_env(),
            ..Default::default()
        }
    }
}

/// Parses a log level, case-insensitively; unknown values fall back to INFO
///
/// ```
/// use cimatrix::util::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("DEBUG"), Level::DEBUG);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn json_from_env() -> bool {
    env::var("CIMATRIX_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}

/// Builds the subscriber filter
///
/// The `cimatrix=<level>` directive is always present so fatal errors stay
/// visible; `RUST_LOG` adds to it, and the hyper/reqwest/h2 defaults only
/// apply when `RUST_LOG` is unset.
pub fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    match format!("cimatrix={}", level).parse::<Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Invalid log directive for level {}: {}", level, e),
    }

    if env::var("RUST_LOG").is_err() {
        for default in ["hyper=warn", "reqwest=warn", "h2=warn"] {
            if let Ok(directive) = default.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }

    filter
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        let registry = tracing_subscriber::registry().with(filter);
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            registry.with(layer.json()).init();
        } else {
            registry.with(layer).init();
        }
    });
}

/// Initializes logging from `CIMATRIX_LOG_LEVEL` and `CIMATRIX_LOG_JSON`
pub fn init_from_env() {
    init_logging(LoggingConfig::from_flags(None, false, false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Warn"), Level::WARN);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    #[serial]
    fn test_crate_directive_survives_rust_log() {
        let old = env::var("RUST_LOG").ok();
        env::set_var("RUST_LOG", "reqwest=debug");

        let filter = build_filter(Level::ERROR).to_string().to_lowercase();

        match old {
            Some(v) => env::set_var("RUST_LOG", v),
            None => env::remove_var("RUST_LOG"),
        }
        assert!(filter.contains("cimatrix=error"), "{}", filter);
        assert!(filter.contains("reqwest=debug"), "{}", filter);
        assert!(!filter.contains("hyper=warn"), "{}", filter);
    }

    #[test]
    #[serial]
    fn test_default_filter_without_rust_log() {
        let old = env::var("RUST_LOG").ok();
        env::remove_var("RUST_LOG");

        let filter = build_filter(Level::INFO).to_string().to_lowercase();

        if let Some(v) = old {
            env::set_var("RUST_LOG", v);
        }
        assert!(filter.contains("cimatrix=info"), "{}", filter);
        assert!(filter.contains("hyper=warn"), "{}", filter);
    }

    #[test]
    fn test_explicit_level_beats_verbosity_flags() {
        assert_eq!(LoggingConfig::from_flags(Some("warn"), true, false).level, Level::WARN);
        assert_eq!(LoggingConfig::from_flags(None, true, false).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_flags(None, false, true).level, Level::ERROR);
    }
}
