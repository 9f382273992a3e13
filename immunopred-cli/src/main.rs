use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use immunopred_core::ImmunopredError;

fn main() {
    let cli = Cli::parse();

    // IMMUNOPRED_LOG sets the filter unless -v asks for more
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_env("IMMUNOPRED_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Predict(args) => crate::cli::commands::predict::run(args),
        Commands::Methods(args) => crate::cli::commands::methods::run(args),
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<ImmunopredError>() {
        Some(err) if err.is_input_error() => 2,
        Some(ImmunopredError::ExecutableNotFound { .. })
        | Some(ImmunopredError::VersionMismatch { .. }) => 3,
        Some(ImmunopredError::SubprocessExecution { .. }) => 4,
        Some(ImmunopredError::EmptyResult { .. }) => 5,
        _ => 1,
    }
}
