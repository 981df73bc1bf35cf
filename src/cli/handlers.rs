//! Subcommand handlers
//!
//! Each handler returns the process exit code. Errors are logged and printed
//! to stderr; nothing is written to stdout on failure.

use crate::cli::commands::{ConfigArgs, GenerateArgs, SmokeArgs};
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::CimatrixConfig;
use crate::matrix::{self, MatrixBuilder, MatrixDocument, MatrixError};
use crate::smoke::SmokeChecker;
use crate::validation::Validator;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, error, info};

pub fn handle_generate(args: &GenerateArgs) -> i32 {
    let mut config = CimatrixConfig::default();
    if let Some(ref languages) = args.languages {
        config.languages_file = languages.clone();
    }
    if let Some(ref addons) = args.addons {
        config.addons_file = addons.clone();
    }
    if let Some(ref output) = args.output {
        config.output_file = Some(output.clone());
    }
    if let Some(ref fallback) = args.default_base_packages {
        config.default_base_packages = fallback.clone();
    }

    match run_generate(args, &config) {
        Ok(()) => 0,
        Err(e) => {
            error!("Matrix generation failed: {:#}", e);
            1
        }
    }
}

fn run_generate(args: &GenerateArgs, config: &CimatrixConfig) -> Result<()> {
    info!(
        languages = %config.languages_file.display(),
        addons = %config.addons_file.display(),
        "Generating build matrix"
    );

    let mut builder = MatrixBuilder::from_files(&config.languages_file, &config.addons_file)?;
    if args.with_base_packages {
        builder = builder.with_base_packages(config.default_base_packages.clone());
    }
    let document = builder.build();

    Validator::new()
        .validate(&document)
        .context("Generated matrix is invalid")?;

    // resolve every destination before writing anything
    let github_env = if args.github_env {
        Some(matrix::github_env_path().ok_or(MatrixError::GithubEnvUnset)?)
    } else {
        None
    };
    let stdout = OutputFormatter::new(args.format.into()).format_matrix(&document)?;

    // the output file is renamed into place last, so a failed append leaves
    // no new matrix.json behind
    let staged = match config.output_file {
        Some(ref path) => Some(matrix::stage_json_file(&document, path)?),
        None => None,
    };
    if let Some(ref path) = github_env {
        matrix::append_github_env(&document, path)?;
    }
    if let Some(staged) = staged {
        staged.commit()?;
    }

    emit(&mut io::stdout().lock(), &stdout).context("Failed to write matrix to stdout")?;
    log_summary(&document);
    Ok(())
}

/// Writes `text` and a newline; a closed reader (`cimatrix generate | head`)
/// is not an error
fn emit<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    match writeln!(out, "{}", text).and_then(|_| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed by reader");
            Ok(())
        }
        result => result,
    }
}

fn log_summary(document: &MatrixDocument) {
    for entry in &document.include {
        debug!("Matrix entry: {}", entry);
    }
    info!(entries = document.len(), "Matrix generated");
}

pub async fn handle_smoke(args: &SmokeArgs) -> i32 {
    let mut config = CimatrixConfig::default();
    if let Some(ref base_url) = args.base_url {
        config.app_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(retries) = args.retries {
        config.smoke_retries = retries;
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return 1;
    }

    let checker = match SmokeChecker::new(
        &config.app_url,
        Duration::from_secs(config.request_timeout_secs),
    ) {
        Ok(checker) => checker.with_retries(
            config.smoke_retries,
            Duration::from_secs(args.retry_interval),
        ),
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let report = checker.run().await;

    match OutputFormatter::new(args.format.into()).format_smoke(&report) {
        Ok(output) => {
            if let Err(e) = emit(&mut io::stdout().lock(), &output) {
                error!("Failed to write smoke report: {}", e);
                return 1;
            }
        }
        Err(e) => {
            error!("Failed to format smoke report: {:#}", e);
            return 1;
        }
    }

    if report.all_passed() {
        info!("All smoke checks passed");
        0
    } else {
        error!(failed = report.failures().count(), "Smoke checks failed");
        1
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = CimatrixConfig::default();
    let format: OutputFormat = args.format.into();

    match OutputFormatter::new(format).format_config(&config) {
        Ok(output) => {
            if let Err(e) = emit(&mut io::stdout().lock(), &output) {
                error!("Failed to write configuration: {}", e);
                return 1;
            }
        }
        Err(e) => {
            error!("Failed to format configuration: {:#}", e);
            return 1;
        }
    }

    match config.validate() {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
