// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration document the registry is built from.
//!
//! Connections and document managers are declared as mappings keyed by alias.
//! The order they are written in matters (the first one becomes the default), and
//! a repeated key must reach the builder so it can be reported instead of silently
//! replacing the earlier entry. Both sections are therefore decoded into ordered
//! lists rather than maps.

use crate::domain::alias::Alias;
use crate::domain::connection::ConnectionConfig;
use crate::domain::document_manager::DocumentManagerConfig;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

/// The full configuration: connections, document managers, defaults, bundles.
///
/// # Examples
///
/// ```
/// use odmwire::domain::{ConnectionConfig, DocumentManagerConfig, RegistryConfig};
///
/// let config = RegistryConfig::new()
///     .with_connection(ConnectionConfig::new("c1", "E1").with_default_database("db1"))
///     .with_connection(ConnectionConfig::new("c2", "E2").with_default_database("db2"))
///     .with_document_manager(DocumentManagerConfig::new("dm1").with_connection("c2"));
///
/// assert_eq!(config.connections.len(), 2);
/// assert_eq!(config.connection("c2").unwrap().endpoint, "E2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, serde::Deserialize)]
pub struct RegistryConfig {
    /// Connections in declaration order.
    #[serde(deserialize_with = "aliased_entries", serialize_with = "serialize_aliased")]
    pub connections: Vec<ConnectionConfig>,
    /// Document managers in declaration order.
    #[serde(
        default,
        deserialize_with = "aliased_entries",
        serialize_with = "serialize_aliased"
    )]
    pub document_managers: Vec<DocumentManagerConfig>,
    /// Explicit default connection.
    #[serde(default)]
    pub default_connection: Option<Alias>,
    /// Explicit default document manager.
    #[serde(default)]
    pub default_document_manager: Option<Alias>,
    /// Named source directories the code generators can target.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub bundles: IndexMap<String, PathBuf>,
}

impl RegistryConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a connection.
    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        self.connections.push(connection);
        self
    }

    /// Appends a document manager.
    pub fn with_document_manager(mut self, document_manager: DocumentManagerConfig) -> Self {
        self.document_managers.push(document_manager);
        self
    }

    /// Sets the default connection.
    pub fn with_default_connection(mut self, alias: impl Into<Alias>) -> Self {
        self.default_connection = Some(alias.into());
        self
    }

    /// Sets the default document manager.
    pub fn with_default_document_manager(mut self, alias: impl Into<Alias>) -> Self {
        self.default_document_manager = Some(alias.into());
        self
    }

    /// Registers a bundle directory.
    pub fn with_bundle(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.bundles.insert(name.into(), dir.into());
        self
    }

    /// Finds the first connection declared under `alias`.
    pub fn connection(&self, alias: &str) -> Option<&ConnectionConfig> {
        self.connections.iter().find(|c| c.alias == alias)
    }

    /// Finds the first document manager declared under `alias`.
    pub fn document_manager(&self, alias: &str) -> Option<&DocumentManagerConfig> {
        self.document_managers.iter().find(|dm| dm.alias == alias)
    }

    /// Finds a bundle directory by name, ignoring ASCII case.
    pub fn bundle(&self, name: &str) -> Option<&PathBuf> {
        self.bundles
            .iter()
            .find(|(bundle, _)| bundle.eq_ignore_ascii_case(name))
            .map(|(_, dir)| dir)
    }
}

/// Entries that take their alias from the mapping key they are declared under.
pub trait Aliased {
    /// The entry's alias.
    fn alias(&self) -> &Alias;
    /// Sets the entry's alias.
    fn set_alias(&mut self, alias: Alias);
}

impl Aliased for ConnectionConfig {
    fn alias(&self) -> &Alias {
        &self.alias
    }

    fn set_alias(&mut self, alias: Alias) {
        self.alias = alias;
    }
}

impl Aliased for DocumentManagerConfig {
    fn alias(&self) -> &Alias {
        &self.alias
    }

    fn set_alias(&mut self, alias: Alias) {
        self.alias = alias;
    }
}

/// Decodes a mapping of alias to entry into a list, keeping order and repeats.
///
/// A null entry (`dm1: ~`) decodes as the entry's default value.
pub fn aliased_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Aliased + Default,
{
    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for EntriesVisitor<T>
    where
        T: Deserialize<'de> + Aliased + Default,
    {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of aliases to entries")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((alias, entry)) = map.next_entry::<String, Option<T>>()? {
                let mut entry = entry.unwrap_or_default();
                entry.set_alias(Alias::from(alias));
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

fn serialize_aliased<S, T>(entries: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: Serialize + Aliased,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for entry in entries {
        map.serialize_entry(entry.alias().as_str(), entry)?;
    }
    map.end()
}
