// SPDX-License-Identifier: MIT OR Apache-2.0

//! odmwire CLI - document and proxy generation.

use clap::Parser;
use odmwire::cli::output::{self, Output};
use odmwire::cli::{self, Cli, CliResult};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Run the CLI and handle errors
    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    cli::run(cli, &mut Output::stdout())
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
