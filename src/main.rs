use cimatrix::cli::commands::{CliArgs, Commands};
use cimatrix::cli::handlers::{handle_config, handle_generate, handle_smoke};
use cimatrix::util::{init_logging, LoggingConfig};
use cimatrix::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args),
        Commands::Smoke(smoke_args) => handle_smoke(smoke_args).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    process::exit(exit_code);
}
