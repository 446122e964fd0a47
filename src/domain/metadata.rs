// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document mappings and the persistence metadata derived from them.

use crate::domain::errors::{ConfigError, Result};
use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};

/// Identifier field used when a mapping does not name one.
pub const DEFAULT_IDENTIFIER: &str = "_id";

/// A field of a mapped document.
///
/// In configuration a field is either a bare name or a mapping with an explicit
/// stored name and Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldSpec")]
pub struct FieldMapping {
    /// Field name on the Rust type.
    pub name: String,
    /// Field name in the stored document.
    pub db_name: String,
    /// Rust type of the field.
    pub rust_type: String,
}

impl FieldMapping {
    /// Creates a string field stored under its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            db_name: name.clone(),
            name,
            rust_type: "String".to_string(),
        }
    }

    /// Sets the stored field name.
    pub fn stored_as(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Sets the Rust type.
    pub fn typed(mut self, rust_type: impl Into<String>) -> Self {
        self.rust_type = rust_type.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldSpec {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        field: Option<String>,
        #[serde(default, rename = "type")]
        rust_type: Option<String>,
    },
}

impl From<FieldSpec> for FieldMapping {
    fn from(spec: FieldSpec) -> Self {
        match spec {
            FieldSpec::Name(name) => FieldMapping::new(name),
            FieldSpec::Full {
                name,
                field,
                rust_type,
            } => {
                let mut mapping = FieldMapping::new(name);
                if let Some(field) = field {
                    mapping = mapping.stored_as(field);
                }
                if let Some(rust_type) = rust_type {
                    mapping = mapping.typed(rust_type);
                }
                mapping
            }
        }
    }
}

/// How a document type is persisted, as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMapping {
    /// Collection name; defaults to the snake-cased type name.
    #[serde(default)]
    pub collection: Option<String>,
    /// Identifier field; defaults to `_id`.
    #[serde(default)]
    pub id: Option<String>,
    /// Mapped fields, in declaration order.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub fields: Vec<FieldMapping>,
}

/// Persistence metadata for one document type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Fully qualified type name, e.g. `blog::Post`.
    pub type_name: String,
    /// Collection the documents live in.
    pub collection: String,
    /// Identifier field in the stored document.
    pub identifier: String,
    /// Mapped fields.
    pub fields: Vec<FieldMapping>,
}

impl DocumentMetadata {
    /// Resolves a configured mapping into metadata for `type_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use odmwire::domain::metadata::{DocumentMapping, DocumentMetadata};
    ///
    /// let metadata = DocumentMetadata::from_mapping("blog::BlogPost", &DocumentMapping::default());
    /// assert_eq!(metadata.collection, "blog_post");
    /// assert_eq!(metadata.identifier, "_id");
    /// assert_eq!(metadata.short_name(), "BlogPost");
    /// ```
    pub fn from_mapping(type_name: &str, mapping: &DocumentMapping) -> Self {
        let short = short_type_name(type_name);
        Self {
            type_name: type_name.to_string(),
            collection: mapping
                .collection
                .clone()
                .unwrap_or_else(|| short.to_snake_case()),
            identifier: mapping
                .id
                .clone()
                .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string()),
            fields: mapping.fields.clone(),
        }
    }

    /// The last path segment of the type name.
    pub fn short_name(&self) -> &str {
        short_type_name(&self.type_name)
    }

    /// Checks the type path, field names and field types are valid Rust.
    pub fn check_rust_names(&self) -> Result<()> {
        let invalid = |message: String| ConfigError::InvalidMapping {
            type_name: self.type_name.clone(),
            message,
        };

        syn::parse_str::<syn::Path>(&self.type_name)
            .map_err(|_| invalid("not a Rust type path".to_string()))?;
        syn::parse_str::<syn::Ident>(self.short_name())
            .map_err(|_| invalid(format!("\"{}\" is not a Rust identifier", self.short_name())))?;
        for field in &self.fields {
            syn::parse_str::<syn::Ident>(&field.name)
                .map_err(|_| invalid(format!("field \"{}\" is not a Rust identifier", field.name)))?;
            syn::parse_str::<syn::Type>(&field.rust_type).map_err(|_| {
                invalid(format!(
                    "field \"{}\" has invalid type \"{}\"",
                    field.name, field.rust_type
                ))
            })?;
        }
        Ok(())
    }
}

/// Returns the last `::`-separated segment of a type path.
pub fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// File stem for sources generated from a type: every path segment snake cased
/// and joined with `_`, so `blog::Post` and `news::Post` never share a file.
pub fn type_file_stem(type_name: &str) -> String {
    type_name
        .split("::")
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_snake_case())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("blog::post::Post"), "Post");
        assert_eq!(short_type_name("Post"), "Post");
    }

    #[test]
    fn test_type_file_stem() {
        assert_eq!(type_file_stem("blog::post::BlogPost"), "blog_post_blog_post");
        assert_eq!(type_file_stem("::Post"), "post");
        assert_ne!(type_file_stem("blog::Post"), type_file_stem("news::Post"));
    }

    #[test]
    fn test_check_rust_names() {
        let valid = DocumentMetadata::from_mapping(
            "blog::Post",
            &DocumentMapping {
                collection: Some("po\"sts".to_string()),
                id: None,
                fields: vec![FieldMapping::new("tags").typed("Vec<String>")],
            },
        );
        assert!(valid.check_rust_names().is_ok());

        let bad_field = DocumentMetadata {
            fields: vec![FieldMapping::new("created at")],
            ..valid.clone()
        };
        assert!(matches!(
            bad_field.check_rust_names(),
            Err(ConfigError::InvalidMapping { ref message, .. }) if message.contains("created at")
        ));

        let bad_type = DocumentMetadata {
            fields: vec![FieldMapping::new("title").typed("String\")] fn x() {")],
            ..valid.clone()
        };
        assert!(bad_type.check_rust_names().is_err());

        let keyword = DocumentMetadata {
            fields: vec![FieldMapping::new("type")],
            ..valid.clone()
        };
        assert!(keyword.check_rust_names().is_err());

        let bad_path = DocumentMetadata::from_mapping("blog::Post-2", &DocumentMapping::default());
        assert!(bad_path.check_rust_names().is_err());
    }

    #[test]
    fn test_metadata_uses_configured_values() {
        let mapping = DocumentMapping {
            collection: Some("articles".to_string()),
            id: Some("slug".to_string()),
            fields: vec![FieldMapping::new("title")],
        };
        let metadata = DocumentMetadata::from_mapping("blog::Post", &mapping);
        assert_eq!(metadata.collection, "articles");
        assert_eq!(metadata.identifier, "slug");
        assert_eq!(metadata.fields.len(), 1);
    }

    #[test]
    fn test_field_mapping_builders() {
        let field = FieldMapping::new("created_at")
            .stored_as("createdAt")
            .typed("i64");
        assert_eq!(field.name, "created_at");
        assert_eq!(field.db_name, "createdAt");
        assert_eq!(field.rust_type, "i64");
    }
}
