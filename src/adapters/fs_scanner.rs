// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem source scanner.
//!
//! Walks a directory of Rust sources and lists the structs and enums declared in
//! them, without compiling anything. Each type is named by its module path
//! relative to the scanned directory.

use crate::domain::{ConfigError, Result};
use crate::ports::{DeclaredType, SourceScanner};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Files whose stem does not add a module segment.
const MODULE_ROOT_FILES: [&str; 3] = ["mod", "lib", "main"];

/// Scanner over `.rs` files using `syn` for a static parse.
///
/// # Examples
///
/// ```rust,no_run
/// use odmwire::adapters::FsSourceScanner;
/// use odmwire::ports::SourceScanner;
/// use std::path::Path;
///
/// let scanner = FsSourceScanner::new().with_prefix("blog");
/// for declared in scanner.scan(Path::new("crates/blog/src")).unwrap() {
///     println!("{} in {}", declared.name, declared.path.display());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsSourceScanner {
    prefix: Option<String>,
}

impl FsSourceScanner {
    /// Creates a scanner naming types relative to the scanned directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `prefix` to every module path, e.g. the crate name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    fn module_path(&self, root: &Path, file: &Path) -> Vec<String> {
        let mut segments: Vec<String> = self.prefix.iter().cloned().collect();

        if let Ok(relative) = file.strip_prefix(root) {
            if let Some(parent) = relative.parent() {
                segments.extend(
                    parent
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned()),
                );
            }
            if let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) {
                if !MODULE_ROOT_FILES.contains(&stem) {
                    segments.push(stem.to_string());
                }
            }
        }

        segments
    }
}

/// Cheap textual check before paying for a full parse.
fn may_declare_types(source: &str) -> bool {
    source.contains("struct ") || source.contains("enum ")
}

fn collect_types(items: &[syn::Item], module: &mut Vec<String>, found: &mut Vec<String>) {
    for item in items {
        match item {
            syn::Item::Struct(item) => found.push(qualify(module, &item.ident)),
            syn::Item::Enum(item) => found.push(qualify(module, &item.ident)),
            syn::Item::Mod(item) => {
                if let Some((_, content)) = &item.content {
                    module.push(item.ident.to_string());
                    collect_types(content, module, found);
                    module.pop();
                }
            }
            _ => {}
        }
    }
}

fn qualify(module: &[String], ident: &syn::Ident) -> String {
    if module.is_empty() {
        ident.to_string()
    } else {
        format!("{}::{}", module.join("::"), ident)
    }
}

impl SourceScanner for FsSourceScanner {
    fn scan(&self, dir: &Path) -> Result<Vec<DeclaredType>> {
        if !dir.is_dir() {
            return Err(ConfigError::SourceError {
                source_name: "fs-scanner".to_string(),
                message: format!("Not a directory: {}", dir.display()),
                source: None,
            });
        }

        let mut declared = Vec::new();

        let entries = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            });

        for entry in entries {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "rs") {
                continue;
            }

            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::debug!("Skipping unreadable file {}: {}", path.display(), e);
                    continue;
                }
            };

            if !may_declare_types(&source) {
                continue;
            }

            let file = match syn::parse_file(&source) {
                Ok(file) => file,
                Err(e) => {
                    tracing::debug!("Skipping unparsable file {}: {}", path.display(), e);
                    continue;
                }
            };

            let mut module = self.module_path(dir, path);
            let mut names = Vec::new();
            collect_types(&file.items, &mut module, &mut names);

            declared.extend(names.into_iter().map(|name| DeclaredType {
                name,
                path: path.to_path_buf(),
            }));
        }

        tracing::debug!("Found {} type declarations under {}", declared.len(), dir.display());
        Ok(declared)
    }
}
