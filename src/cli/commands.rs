use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CI build-matrix generator and end-to-end smoke checker
#[derive(Parser, Debug)]
#[command(
    name = "cimatrix",
    about = "CI build-matrix generator and end-to-end smoke checker",
    version,
    long_about = "cimatrix expands languages.yaml and addons.yaml into a CI build matrix \
                  ({\"include\": [...]}) with one entry per language version, and runs \
                  HTTP smoke checks against a deployed service."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the CI build matrix",
        long_about = "Reads the language/version and addons documents and prints the build \
                      matrix. Optionally writes it to a JSON file and appends MATRIX=<json> \
                      to the file named by GITHUB_ENV.\n\n\
                      Examples:\n  \
                      cimatrix generate\n  \
                      cimatrix generate --output matrix.json\n  \
                      cimatrix generate --github-env --with-base-packages"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Run HTTP smoke checks against a service",
        long_about = "Checks GET /health (expects 200) and GET /api/test-db (expects \
                      {\"status\": \"success\"}). Exits non-zero if any check fails.\n\n\
                      Examples:\n  \
                      cimatrix smoke\n  \
                      cimatrix smoke --base-url http://localhost:8080 --retries 10"
    )]
    Smoke(SmokeArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Language/version document (default: languages.yaml)"
    )]
    pub languages: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Addons document (default: addons.yaml)")]
    pub addons: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Also write the matrix to this JSON file"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Append MATRIX=<json> to the file named by GITHUB_ENV")]
    pub github_env: bool,

    #[arg(long, help = "Add a base_packages field to every entry")]
    pub with_base_packages: bool,

    #[arg(
        long,
        value_name = "PACKAGES",
        requires = "with_base_packages",
        help = "Fallback when addons.yaml has no base_packages (default: \"curl git\")"
    )]
    pub default_base_packages: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "json",
        help = "Stdout format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct SmokeArgs {
    #[arg(
        long,
        value_name = "URL",
        help = "Service base URL (default: http://app:8080)"
    )]
    pub base_url: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Per-request timeout (default: 10)")]
    pub timeout: Option<u64>,

    #[arg(long, value_name = "N", help = "Connection retries per check (default: 0)")]
    pub retries: Option<u32>,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "2",
        help = "Delay between connection retries"
    )]
    pub retry_interval: u64,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
