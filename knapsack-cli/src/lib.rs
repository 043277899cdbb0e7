//! Command-line interface for solving 0/1 knapsack instances.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod format;
mod fs;
mod parse;
mod solve;

pub use error::CliError;
pub use format::{OutputFormat, format_solution};
pub use parse::{ParseError, parse_instance};

use solve::{SolveArgs, run_solve};

const ARG_INSTANCE: &str = "instance-path";
const ENV_INSTANCE: &str = "KNAPSACK_INSTANCE_PATH";
const ARG_ALGORITHM: &str = "algorithm";
const AUTO_ALGORITHM: &str = "auto";

/// Run the knapsack CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// instance cannot be read or parsed, the solver fails, or output cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version requests are not failures.
        Err(err) if !err.use_stderr() => return err.print().map_err(CliError::WriteOutput),
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "knapsack",
    about = "Exact and heuristic 0/1 knapsack solving",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve an instance file and print the packing.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
