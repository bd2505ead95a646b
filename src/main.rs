//! # Hashify command-line entry point
//!
//! ```bash
//! hashify google --file clientes.csv
//! hashify meta --file clientes.csv --target phone
//! hashify classify --file clientes.csv
//! ```
//!
//! Set `RUST_LOG=debug` to see per-column decisions.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // Allow println!/eprintln! in the binary

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = hashify::logging::init() {
        hashify::logging::init_console_only();
        tracing::warn!("File logging disabled: {e:#}");
    }

    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
