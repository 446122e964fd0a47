// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Target of `generate:proxies` covering every configured bundle.
pub const ALL_BUNDLES: &str = "all";

/// odmwire - document and proxy generation for configured document managers
#[derive(Parser, Debug)]
#[command(name = "odmwire")]
#[command(version)]
#[command(about = "Generates documents and proxies for configured document managers", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ODMWIRE_CONFIG",
        default_value = "odmwire.yaml"
    )]
    pub config: PathBuf,

    /// Build document managers in development mode
    #[arg(long, global = true, env = "ODMWIRE_DEV")]
    pub dev: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generates document sources using document metadata
    #[command(name = "generate:documents")]
    GenerateDocuments(GenerateDocumentsArgs),

    /// Generates proxy sources using document metadata
    #[command(name = "generate:proxies")]
    GenerateProxies(GenerateProxiesArgs),
}

/// Arguments for the `generate:documents` command
#[derive(Args, Debug)]
pub struct GenerateDocumentsArgs {
    /// Bundle name, or a directory holding document sources
    pub target: String,

    /// Document manager providing the metadata (defaults to the default one)
    #[arg(long = "dm")]
    pub document_manager: Option<String>,

    /// Directory generated documents are written to (defaults to the documents directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Module path prepended to scanned type names, e.g. the crate name
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Arguments for the `generate:proxies` command
#[derive(Args, Debug)]
pub struct GenerateProxiesArgs {
    /// Bundle name, `all`, or a directory holding document sources
    pub target: String,

    /// Document manager providing the metadata (defaults to the default one)
    #[arg(long = "dm")]
    pub document_manager: Option<String>,

    /// Module path prepended to scanned type names, e.g. the crate name
    #[arg(long)]
    pub prefix: Option<String>,
}
