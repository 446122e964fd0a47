// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document generator emitting Rust structs.

use crate::domain::metadata::{type_file_stem, DEFAULT_IDENTIFIER};
use crate::domain::{DocumentMetadata, Result};
use crate::ports::DocumentGenerator;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one `<snake_case type path>.rs` file per document into an output
/// directory, `blog::Post` into `blog_post.rs`.
///
/// The generated struct derives `serde` traits and renames fields whose stored
/// name differs from the Rust name. Mappings whose names are not valid Rust are
/// rejected with `InvalidMapping`.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::RustDocumentGenerator;
/// use odmwire::domain::{DocumentMapping, DocumentMetadata, FieldMapping};
///
/// let mapping = DocumentMapping {
///     collection: Some("posts".to_string()),
///     id: None,
///     fields: vec![FieldMapping::new("title")],
/// };
/// let metadata = DocumentMetadata::from_mapping("blog::Post", &mapping);
/// let source = RustDocumentGenerator::render(&metadata).unwrap();
///
/// assert!(source.contains("pub struct Post {"));
/// assert!(source.contains("pub title: String,"));
/// ```
#[derive(Debug, Clone)]
pub struct RustDocumentGenerator {
    output_dir: PathBuf,
}

impl RustDocumentGenerator {
    /// Creates a generator writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory generated files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The file the document is written to.
    pub fn target_path(&self, metadata: &DocumentMetadata) -> PathBuf {
        self.output_dir
            .join(format!("{}.rs", type_file_stem(&metadata.type_name)))
    }

    /// Renders the document source.
    pub fn render(metadata: &DocumentMetadata) -> Result<String> {
        metadata.check_rust_names()?;

        let mut out = String::new();
        let _ = writeln!(out, "// Generated from the mapping of `{}`.", metadata.type_name);
        let _ = writeln!(out, "// Collection: {:?}", metadata.collection);
        let _ = writeln!(out);
        let _ = writeln!(out, "use serde::{{Deserialize, Serialize}};");
        let _ = writeln!(out);
        let _ = writeln!(out, "#[derive(Debug, Clone, Default, Serialize, Deserialize)]");
        let _ = writeln!(out, "pub struct {} {{", metadata.short_name());

        let id_field = metadata.identifier.trim_start_matches('_');
        let id_field = match syn::parse_str::<syn::Ident>(id_field) {
            Ok(_) => id_field,
            Err(_) => "id",
        };
        let id_declared = metadata.fields.iter().any(|f| f.db_name == metadata.identifier);
        if !id_declared {
            if metadata.identifier != id_field {
                let _ = writeln!(out, "    #[serde(rename = {:?})]", metadata.identifier);
            }
            let _ = writeln!(out, "    pub {}: Option<String>,", id_field);
        }

        for field in &metadata.fields {
            if field.db_name != field.name {
                let _ = writeln!(out, "    #[serde(rename = {:?})]", field.db_name);
            }
            let _ = writeln!(out, "    pub {}: {},", field.name, field.rust_type);
        }

        let _ = writeln!(out, "}}");
        let _ = writeln!(out);
        let _ = writeln!(out, "impl {} {{", metadata.short_name());
        let _ = writeln!(out, "    /// Collection documents of this type are stored in.");
        let _ = writeln!(
            out,
            "    pub const COLLECTION: &'static str = {:?};",
            metadata.collection
        );
        if metadata.identifier != DEFAULT_IDENTIFIER {
            let _ = writeln!(out);
            let _ = writeln!(out, "    /// Stored identifier field.");
            let _ = writeln!(
                out,
                "    pub const IDENTIFIER: &'static str = {:?};",
                metadata.identifier
            );
        }
        let _ = writeln!(out, "}}");
        Ok(out)
    }
}

impl DocumentGenerator for RustDocumentGenerator {
    fn generate_class(&self, metadata: &DocumentMetadata) -> Result<PathBuf> {
        let source = Self::render(metadata)?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.target_path(metadata);
        fs::write(&path, source)?;
        tracing::debug!("Generated document {} at {}", metadata.type_name, path.display());
        Ok(path)
    }
}
