//! Patitas CLI: suite tooling for the Huellitas E2E harness
//!
//! ## Usage
//!
//! ```bash
//! patitas check features/                # Validate feature files
//! patitas list --platform android       # Scenarios the android suite runs
//! patitas tags '@web and not @legacy'    # Inspect a tag expression
//! ```

use clap::Parser;
use patitas_cli::{handlers, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check(args) => handlers::execute_check(&args),
        Commands::List(args) => handlers::execute_list(&args),
        Commands::Tags(args) => handlers::execute_tags(&args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
