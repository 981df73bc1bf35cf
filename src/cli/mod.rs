pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, GenerateArgs, SmokeArgs};
pub use output::{OutputFormat, OutputFormatter};
