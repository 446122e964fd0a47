// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document and proxy generation over a source directory.
//!
//! Both generators scan a directory for declared types and keep the ones the
//! document manager has metadata for. Types without metadata are skipped
//! silently; any other failure aborts the run.

use crate::domain::{DocumentMetadata, Result};
use crate::ports::{DeclaredType, DocumentGenerator, SourceScanner};
use crate::service::document_manager::DocumentManager;
use std::path::Path;
use std::sync::Arc;

/// Looks up metadata for a declared type, mapping `NoMetadata` to `None`.
fn document_metadata(dm: &DocumentManager, declared: &DeclaredType) -> Result<Option<DocumentMetadata>> {
    match dm.get_metadata(&declared.name) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.is_no_metadata() => {
            tracing::trace!("Skipping {}: not a document of '{}'", declared.name, dm.alias());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Regenerates the documents declared in a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use odmwire::adapters::{FsSourceScanner, RustDocumentGenerator};
/// use odmwire::service::DocumentsGenerator;
/// use std::sync::Arc;
///
/// let generator = DocumentsGenerator::new(
///     Arc::new(FsSourceScanner::new()),
///     Arc::new(RustDocumentGenerator::new("src/documents")),
/// );
/// ```
#[derive(Clone)]
pub struct DocumentsGenerator {
    scanner: Arc<dyn SourceScanner>,
    generator: Arc<dyn DocumentGenerator>,
}

impl DocumentsGenerator {
    /// Creates a generator.
    pub fn new(scanner: Arc<dyn SourceScanner>, generator: Arc<dyn DocumentGenerator>) -> Self {
        Self { scanner, generator }
    }

    /// Generates every document under `dir` known to `dm`, returning how many.
    pub fn generate_documents(&self, dm: &DocumentManager, dir: &Path) -> Result<usize> {
        let mut generated = 0;

        for declared in self.scanner.scan(dir)? {
            let Some(metadata) = document_metadata(dm, &declared)? else {
                continue;
            };
            let path = self.generator.generate_class(&metadata)?;
            tracing::debug!("Generated document {} into {}", declared.name, path.display());
            generated += 1;
        }

        tracing::info!(
            "Generated {} documents from {} for '{}'",
            generated,
            dir.display(),
            dm.alias()
        );
        Ok(generated)
    }
}

/// Generates proxies for the documents declared in a directory.
///
/// Proxies are always written, whatever mode the document manager's own proxy
/// factory is in: a generating factory over the same directory and namespace is
/// used.
#[derive(Clone)]
pub struct ProxiesGenerator {
    scanner: Arc<dyn SourceScanner>,
}

impl ProxiesGenerator {
    /// Creates a generator.
    pub fn new(scanner: Arc<dyn SourceScanner>) -> Self {
        Self { scanner }
    }

    /// Generates proxies, returning the document type names they were written for.
    pub fn generate_proxies(&self, dm: &DocumentManager, dir: &Path) -> Result<Vec<String>> {
        let factory = dm
            .proxy_factory()
            .to_generating(Arc::clone(dm.metadata_factory()));
        let mut generated = Vec::new();

        for declared in self.scanner.scan(dir)? {
            if document_metadata(dm, &declared)?.is_none() {
                continue;
            }
            factory.generate_proxy_class(&declared.name)?;
            generated.push(declared.name);
        }

        tracing::info!(
            "Generated {} proxies from {} into {}",
            generated.len(),
            dir.display(),
            factory.dir().display()
        );
        Ok(generated)
    }
}
