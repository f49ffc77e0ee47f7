use std::process::ExitCode;

use clap::Parser;
use pickleball::commands::base_commands::{CliArgs, Commands};
use pickleball::commands::completions_cmd::completions_command;
use pickleball::commands::simulate_cmd::simulate_command;
use tracing::Level;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, args.quiet);

    match args.command {
        Commands::Simulate(simulate) => simulate_command(simulate),
        Commands::Completions { shell } => completions_command(shell),
    }
}

// Logs go to stderr; stdout carries the report.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose > 0 {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
