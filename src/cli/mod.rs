// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line interface.
//!
//! The CLI builds the registry with an in-memory client factory, so generating
//! code never opens a database connection.

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Command};
pub use commands::{run, Context};
pub use error::{CliError, CliResult};
pub use output::Output;
