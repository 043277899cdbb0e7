//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use eyre::WrapErr;

fn main() -> eyre::Result<()> {
    env_logger::init();
    knapsack_cli::run().wrap_err("knapsack")
}
