// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata factory backed by the document mappings in configuration.

use crate::domain::{ConfigError, DocumentMapping, DocumentMetadata, Result};
use crate::ports::MetadataFactory;
use indexmap::IndexMap;

/// A metadata factory over a fixed set of document mappings.
///
/// Metadata is resolved once, when the factory is created.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::StaticMetadataFactory;
/// use odmwire::domain::DocumentMapping;
/// use odmwire::ports::MetadataFactory;
///
/// let factory = StaticMetadataFactory::new()
///     .with_mapping("blog::Post", DocumentMapping::default());
///
/// assert_eq!(factory.get_metadata("blog::Post").unwrap().collection, "post");
/// assert!(factory.get_metadata("blog::Draft").unwrap_err().is_no_metadata());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataFactory {
    documents: IndexMap<String, DocumentMetadata>,
}

impl StaticMetadataFactory {
    /// Creates a factory that knows no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory from configured mappings.
    pub fn from_mappings(mappings: &IndexMap<String, DocumentMapping>) -> Self {
        let documents = mappings
            .iter()
            .map(|(type_name, mapping)| {
                (
                    type_name.clone(),
                    DocumentMetadata::from_mapping(type_name, mapping),
                )
            })
            .collect();
        Self { documents }
    }

    /// Adds a mapping.
    pub fn with_mapping(mut self, type_name: impl Into<String>, mapping: DocumentMapping) -> Self {
        let type_name = type_name.into();
        let metadata = DocumentMetadata::from_mapping(&type_name, &mapping);
        self.documents.insert(type_name, metadata);
        self
    }

    /// Number of mapped documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true when no document is mapped.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl MetadataFactory for StaticMetadataFactory {
    fn get_metadata(&self, type_name: &str) -> Result<DocumentMetadata> {
        self.documents
            .get(type_name)
            .cloned()
            .ok_or_else(|| ConfigError::NoMetadata {
                type_name: type_name.to_string(),
            })
    }

    fn type_names(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldMapping;

    #[test]
    fn test_from_mappings_keeps_order() {
        let mut mappings = IndexMap::new();
        mappings.insert("blog::Post".to_string(), DocumentMapping::default());
        mappings.insert("blog::Author".to_string(), DocumentMapping::default());

        let factory = StaticMetadataFactory::from_mappings(&mappings);
        assert_eq!(factory.len(), 2);
        assert_eq!(factory.type_names(), vec!["blog::Post", "blog::Author"]);
    }

    #[test]
    fn test_get_metadata_resolves_mapping() {
        let factory = StaticMetadataFactory::new().with_mapping(
            "blog::Post",
            DocumentMapping {
                collection: Some("posts".to_string()),
                id: None,
                fields: vec![FieldMapping::new("title")],
            },
        );

        let metadata = factory.get_metadata("blog::Post").unwrap();
        assert_eq!(metadata.collection, "posts");
        assert_eq!(metadata.identifier, "_id");
        assert!(factory.is_document("blog::Post"));
    }

    #[test]
    fn test_unknown_type_is_no_metadata() {
        let factory = StaticMetadataFactory::new();
        assert!(factory.is_empty());
        let err = factory.get_metadata("blog::Post").unwrap_err();
        assert!(matches!(err, ConfigError::NoMetadata { ref type_name } if type_name == "blog::Post"));
    }
}
