// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document manager configuration.

use crate::domain::alias::Alias;
use crate::domain::metadata::DocumentMapping;
use crate::domain::option_value::{OptionValue, Options};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Namespace generated proxies live in when none is configured.
pub const DEFAULT_PROXY_NAMESPACE: &str = "Proxies";

/// Configuration of one document manager.
///
/// Every field except the alias is optional: the connection falls back to the
/// registry's default connection, the database to that connection's default
/// database, and the proxy settings to crate-wide defaults.
///
/// # Examples
///
/// ```
/// use odmwire::domain::DocumentManagerConfig;
///
/// let dm = DocumentManagerConfig::new("reporting")
///     .with_connection("replica")
///     .with_database("stats");
///
/// assert_eq!(dm.connection.unwrap().as_str(), "replica");
/// assert_eq!(dm.database.as_deref(), Some("stats"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentManagerConfig {
    /// The key this document manager is declared under.
    #[serde(skip)]
    pub alias: Alias,
    /// Connection alias; defaults to the registry default connection.
    #[serde(default)]
    pub connection: Option<Alias>,
    /// Database name; defaults to the connection's default database.
    #[serde(default)]
    pub database: Option<String>,
    /// Read/write concern overrides applied when the database is selected.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub database_options: Options,
    /// Namespace of generated proxies.
    #[serde(default)]
    pub proxy_namespace: Option<String>,
    /// Directory generated proxies are written to.
    #[serde(default)]
    pub proxy_dir: Option<PathBuf>,
    /// Document types this manager knows, keyed by fully qualified type name.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub mappings: IndexMap<String, DocumentMapping>,
}

impl DocumentManagerConfig {
    /// Creates a document manager that inherits everything.
    pub fn new(alias: impl Into<Alias>) -> Self {
        Self {
            alias: alias.into(),
            ..Self::default()
        }
    }

    /// Sets the connection alias.
    pub fn with_connection(mut self, connection: impl Into<Alias>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Sets the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Adds a database option.
    pub fn with_database_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.database_options.insert(key.into(), value.into());
        self
    }

    /// Sets where proxies are generated.
    pub fn with_proxies(mut self, namespace: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.proxy_namespace = Some(namespace.into());
        self.proxy_dir = Some(dir.into());
        self
    }

    /// Maps a document type.
    pub fn with_mapping(mut self, type_name: impl Into<String>, mapping: DocumentMapping) -> Self {
        self.mappings.insert(type_name.into(), mapping);
        self
    }
}
