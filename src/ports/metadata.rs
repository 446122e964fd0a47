// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata factory trait definition.

use crate::domain::{DocumentMetadata, Result};
use std::fmt::Debug;

/// Provides persistence metadata for document types.
///
/// A lookup for a type that isn't a mapped document must fail with
/// [`ConfigError::NoMetadata`](crate::domain::ConfigError::NoMetadata). The code
/// generators rely on that variant to tell "not a document, skip it" apart from
/// real failures.
///
/// # Examples
///
/// ```rust
/// use odmwire::domain::{ConfigError, DocumentMapping, DocumentMetadata, Result};
/// use odmwire::ports::MetadataFactory;
///
/// #[derive(Debug)]
/// struct OnlyPosts;
///
/// impl MetadataFactory for OnlyPosts {
///     fn get_metadata(&self, type_name: &str) -> Result<DocumentMetadata> {
///         if type_name == "blog::Post" {
///             Ok(DocumentMetadata::from_mapping(type_name, &DocumentMapping::default()))
///         } else {
///             Err(ConfigError::NoMetadata { type_name: type_name.to_string() })
///         }
///     }
///
///     fn type_names(&self) -> Vec<String> {
///         vec!["blog::Post".to_string()]
///     }
/// }
///
/// assert!(OnlyPosts.get_metadata("blog::Post").is_ok());
/// assert!(OnlyPosts.get_metadata("blog::Comment").unwrap_err().is_no_metadata());
/// ```
pub trait MetadataFactory: Send + Sync + Debug {
    /// Returns metadata for `type_name`.
    fn get_metadata(&self, type_name: &str) -> Result<DocumentMetadata>;

    /// All type names this factory knows, in declaration order.
    fn type_names(&self) -> Vec<String>;

    /// Returns true when `type_name` is a mapped document.
    fn is_document(&self, type_name: &str) -> bool {
        self.get_metadata(type_name).is_ok()
    }
}
