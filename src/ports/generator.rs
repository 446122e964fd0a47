// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code generation ports: finding declared types and emitting document sources.

use crate::domain::{DocumentMetadata, Result};
use std::path::{Path, PathBuf};

/// A type declaration found by a [`SourceScanner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredType {
    /// Fully qualified type name, e.g. `blog::post::Post`.
    pub name: String,
    /// File the type is declared in.
    pub path: PathBuf,
}

/// Lists the types declared under a directory without compiling or running them.
///
/// Unreadable subdirectories and files that can't be parsed are skipped, not
/// reported.
pub trait SourceScanner: Send + Sync {
    /// Scans `dir` recursively, returning declarations in a stable order.
    fn scan(&self, dir: &Path) -> Result<Vec<DeclaredType>>;
}

/// Emits the source of a document type from its metadata.
pub trait DocumentGenerator: Send + Sync {
    /// Writes the document source, returning the file written.
    fn generate_class(&self, metadata: &DocumentMetadata) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoTypes;

    impl SourceScanner for NoTypes {
        fn scan(&self, _dir: &Path) -> Result<Vec<DeclaredType>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_scanner_object_safe() {
        let scanner: Box<dyn SourceScanner> = Box::new(NoTypes);
        assert!(scanner.scan(Path::new(".")).unwrap().is_empty());
    }

    #[test]
    fn test_generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DocumentGenerator>();
        assert_send_sync::<dyn SourceScanner>();
    }
}
