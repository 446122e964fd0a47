// SPDX-License-Identifier: MIT OR Apache-2.0

//! `generate:documents` and `generate:proxies`.

use crate::adapters::{FsSourceScanner, InMemoryClientFactory, RustDocumentGenerator, YamlConfigFile};
use crate::cli::args::{Cli, Command, GenerateDocumentsArgs, GenerateProxiesArgs, ALL_BUNDLES};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output::Output;
use crate::domain::{ConfigError, RegistryConfig};
use crate::service::{
    DocumentManager, DocumentsGenerator, ProxiesGenerator, Registry, ServiceGraphBuilder,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Subdirectory of a bundle holding its document sources.
pub const DOCUMENTS_DIR: &str = "documents";

/// Configuration and registry a command runs against.
#[derive(Debug)]
pub struct Context {
    /// The decoded configuration.
    pub config: RegistryConfig,
    /// The registry built from it.
    pub registry: Registry,
}

impl Context {
    /// Loads `config_path` and builds its registry without connecting anywhere.
    pub fn load(config_path: &Path, development_mode: bool) -> CliResult<Self> {
        let config = YamlConfigFile::from_file(config_path)?.into_config();
        Self::from_config(config, development_mode)
    }

    /// Builds the registry of an already decoded configuration.
    pub fn from_config(config: RegistryConfig, development_mode: bool) -> CliResult<Self> {
        let registry = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()))
            .development_mode(development_mode)
            .build(&config)?;
        Ok(Self { config, registry })
    }

    /// The document manager `alias`, or the default one.
    pub fn document_manager(&self, alias: Option<&str>) -> CliResult<Arc<DocumentManager>> {
        match alias {
            Some(alias) => self.registry.document_manager(alias).map_err(|e| match e {
                ConfigError::UnknownDocumentManager { alias } => {
                    CliError::UnknownDocumentManager(alias)
                }
                other => CliError::Config(other),
            }),
            None => Ok(self.registry.default_document_manager()?),
        }
    }

    /// Documents directory of `target`: `<bundle dir>/documents` for a
    /// configured bundle (case-insensitive), `target` itself otherwise.
    pub fn documents_dir(&self, target: &str) -> PathBuf {
        match self.config.bundle(target) {
            Some(dir) => dir.join(DOCUMENTS_DIR),
            None => PathBuf::from(target),
        }
    }
}

/// Runs the parsed command, writing its report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut Output<W>) -> CliResult<()> {
    let context = Context::load(&cli.config, cli.dev)?;
    match &cli.command {
        Command::GenerateDocuments(args) => generate_documents(&context, args, out),
        Command::GenerateProxies(args) => generate_proxies(&context, args, out),
    }
}

fn scanner(prefix: Option<&str>) -> FsSourceScanner {
    match prefix {
        Some(prefix) => FsSourceScanner::new().with_prefix(prefix),
        None => FsSourceScanner::new(),
    }
}

/// `generate:documents <target> [--dm <alias>]`
pub fn generate_documents<W: Write>(
    context: &Context,
    args: &GenerateDocumentsArgs,
    out: &mut Output<W>,
) -> CliResult<()> {
    let dir = context.documents_dir(&args.target);
    if !dir.is_dir() {
        out.line(&format!(
            "Documents directory \"{}\" for \"{}\" does not exist.",
            dir.display(),
            args.target
        ))?;
        return Ok(());
    }

    let dm = context.document_manager(args.document_manager.as_deref())?;
    let output_dir = args.output.clone().unwrap_or_else(|| dir.clone());
    let generator = DocumentsGenerator::new(
        Arc::new(scanner(args.prefix.as_deref())),
        Arc::new(RustDocumentGenerator::new(output_dir)),
    );

    let generated = generator.generate_documents(&dm, &dir)?;
    out.line(&format!("Generated {} document classes.", generated))?;
    Ok(())
}

/// `generate:proxies <target|all> [--dm <alias>]`
pub fn generate_proxies<W: Write>(
    context: &Context,
    args: &GenerateProxiesArgs,
    out: &mut Output<W>,
) -> CliResult<()> {
    let dm = context.document_manager(args.document_manager.as_deref())?;

    let dirs: Vec<PathBuf> = if args.target.eq_ignore_ascii_case(ALL_BUNDLES) {
        context
            .config
            .bundles
            .values()
            .map(|dir| dir.join(DOCUMENTS_DIR))
            .collect()
    } else {
        vec![context.documents_dir(&args.target)]
    };

    let generator = ProxiesGenerator::new(Arc::new(scanner(args.prefix.as_deref())));
    let mut generated = Vec::new();
    for dir in dirs.iter().filter(|dir| dir.is_dir()) {
        generated.extend(generator.generate_proxies(&dm, dir)?);
    }

    if generated.is_empty() {
        let location = match dirs.as_slice() {
            [dir] => dir.display().to_string(),
            _ => args.target.clone(),
        };
        out.warn(&format!(
            "There is no document classes at location {}.",
            location
        ))?;
        return Ok(());
    }

    out.success(&format!(
        "Proxies successfully generated for {} document classes:",
        generated.len()
    ))?;
    for type_name in &generated {
        out.item(type_name)?;
    }
    Ok(())
}
