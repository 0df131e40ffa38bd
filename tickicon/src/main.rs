use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tickicon::{
    cli::cmd::{self, Commands},
    config::Config,
};
use tracing::error;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CommandLine {
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./tickicon.toml when present)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[clap(short, long, num_args = 0, global = true)]
    verbose: bool,
}

pub fn main() -> ExitCode {
    // Parse command line options before we configure logging so we can set the
    // default level
    let command_line = CommandLine::parse();

    // Configure logging
    {
        let default_filter = if command_line.verbose { "debug" } else { "info" };

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .init();
    }

    let Some(command) = command_line.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    let config = match Config::resolve(command_line.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Dispatch command
    match command {
        Commands::Draw(args) => cmd::draw::run(args, &config),
        Commands::Convert(args) => cmd::convert::run(args, &config),
        Commands::Backends(args) => cmd::backends::run(args, &config),
    }
}
