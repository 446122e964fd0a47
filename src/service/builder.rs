// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of a [`RegistryConfig`] into a [`Registry`].
//!
//! Connections are resolved first, in declaration order, each into one driver
//! client. Document managers are resolved second: each is bound to a client, a
//! database is selected, and the metadata and proxy factories are attached. The
//! first error aborts the build and nothing is returned.

use crate::adapters::StaticMetadataFactory;
use crate::domain::document_manager::DEFAULT_PROXY_NAMESPACE;
use crate::domain::{
    translate_options, Alias, ConfigError, DocumentManagerConfig, RegistryConfig, Result,
};
use crate::ports::{ClientFactory, DatabaseClient, MetadataFactory};
use crate::service::bulk::BulkWriteBuilderFactory;
use crate::service::document_manager::DocumentManager;
use crate::service::proxy::{default_proxy_dir, ProxyFactory};
use crate::service::registry::Registry;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Builds registries from configuration.
///
/// The builder keeps no state between calls: building the same configuration
/// twice yields registries with the same aliases and defaults.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::InMemoryClientFactory;
/// use odmwire::domain::{ConnectionConfig, RegistryConfig};
/// use odmwire::service::ServiceGraphBuilder;
/// use std::sync::Arc;
///
/// # fn main() -> odmwire::domain::Result<()> {
/// let config = RegistryConfig::new()
///     .with_connection(ConnectionConfig::new("c1", "E1").with_default_database("db1"))
///     .with_connection(ConnectionConfig::new("c2", "E2").with_default_database("db2"));
///
/// let registry = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new())).build(&config)?;
///
/// assert_eq!(registry.default_connection(), "c1");
/// assert_eq!(registry.default_database()?.name(), "db1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ServiceGraphBuilder {
    client_factory: Arc<dyn ClientFactory>,
    development_mode: bool,
}

/// A connection's client and the bulk write factory bound to it.
struct Connected {
    client: Arc<dyn DatabaseClient>,
    bulk_writes: Arc<BulkWriteBuilderFactory>,
}

impl ServiceGraphBuilder {
    /// Creates a builder connecting through `client_factory`, in production mode.
    pub fn new(client_factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            client_factory,
            development_mode: false,
        }
    }

    /// Selects generating proxy factories (`true`) or compiled ones (`false`).
    pub fn development_mode(mut self, enabled: bool) -> Self {
        self.development_mode = enabled;
        self
    }

    /// Returns true when document managers get generating proxy factories.
    pub fn is_development_mode(&self) -> bool {
        self.development_mode
    }

    /// Builds the registry.
    pub fn build(&self, config: &RegistryConfig) -> Result<Registry> {
        if config.connections.is_empty() {
            return Err(ConfigError::NoConnections);
        }
        check_unique("connection", config.connections.iter().map(|c| &c.alias))?;
        check_unique(
            "document manager",
            config.document_managers.iter().map(|dm| &dm.alias),
        )?;

        let default_connection = match &config.default_connection {
            Some(alias) if config.connection(alias.as_str()).is_none() => {
                return Err(ConfigError::UnknownDefault {
                    kind: "connection".to_string(),
                    alias: alias.to_string(),
                })
            }
            Some(alias) => alias.clone(),
            None => config.connections[0].alias.clone(),
        };

        let mut connected: IndexMap<Alias, Connected> = IndexMap::new();

        for connection in &config.connections {
            let alias = &connection.alias;
            if connection.endpoint.trim().is_empty() {
                return Err(ConfigError::missing_option(alias.as_str(), "endpoint"));
            }

            let options = translate_options(alias.as_str(), &connection.options)?;
            let client = self.client_factory.connect(
                &connection.endpoint,
                &options,
                &connection.driver_options,
            )?;
            tracing::debug!(
                "Registered client '{}' via {} for {}",
                alias,
                self.client_factory.name(),
                connection.endpoint
            );

            connected.insert(
                alias.clone(),
                Connected {
                    client,
                    bulk_writes: Arc::new(BulkWriteBuilderFactory::new(alias)),
                },
            );
        }

        let synthesized;
        let document_managers: &[DocumentManagerConfig] = if config.document_managers.is_empty() {
            tracing::debug!(
                "No document manager configured, using '{}' on connection '{}'",
                Alias::DEFAULT,
                default_connection
            );
            synthesized = [DocumentManagerConfig::new(Alias::DEFAULT)];
            &synthesized
        } else {
            &config.document_managers
        };

        let mut databases = IndexMap::new();
        let mut managers = IndexMap::new();

        for dm in document_managers {
            let alias = &dm.alias;
            let connection = dm.connection.as_ref().unwrap_or(&default_connection);

            let Connected {
                client,
                bulk_writes,
            } = connected.get(connection).ok_or_else(|| {
                ConfigError::DanglingConnectionReference {
                    document_manager: alias.to_string(),
                    connection: connection.to_string(),
                }
            })?;

            let database_name = dm
                .database
                .as_ref()
                .or_else(|| {
                    config
                        .connection(connection.as_str())
                        .and_then(|c| c.default_database.as_ref())
                })
                .ok_or_else(|| ConfigError::missing_option(alias.as_str(), "database"))?;

            let options = translate_options(alias.as_str(), &dm.database_options)?;
            let database = client.select_database(database_name, &options)?;

            let metadata: Arc<dyn MetadataFactory> =
                Arc::new(StaticMetadataFactory::from_mappings(&dm.mappings));
            let proxies = self.proxy_factory(dm, Arc::clone(&metadata));

            tracing::debug!(
                "Registered document manager '{}' on '{}.{}' ({} documents, {:?})",
                alias,
                connection,
                database_name,
                dm.mappings.len(),
                proxies
            );

            databases.insert(alias.clone(), Arc::clone(&database));
            managers.insert(
                alias.clone(),
                Arc::new(DocumentManager::new(
                    alias.clone(),
                    connection.clone(),
                    database,
                    metadata,
                    proxies,
                    Arc::clone(bulk_writes),
                )),
            );
        }

        let default_document_manager = match &config.default_document_manager {
            Some(alias) if !managers.contains_key(alias) => {
                return Err(ConfigError::UnknownDefault {
                    kind: "document manager".to_string(),
                    alias: alias.to_string(),
                })
            }
            Some(alias) => alias.clone(),
            None => document_managers[0].alias.clone(),
        };

        tracing::info!(
            "Built registry with {} connections and {} document managers (defaults '{}' and '{}')",
            connected.len(),
            managers.len(),
            default_connection,
            default_document_manager
        );

        Ok(Registry {
            clients: connected
                .into_iter()
                .map(|(alias, connected)| (alias, connected.client))
                .collect(),
            databases,
            document_managers: managers,
            default_connection,
            default_document_manager,
        })
    }

    fn proxy_factory(
        &self,
        dm: &DocumentManagerConfig,
        metadata: Arc<dyn MetadataFactory>,
    ) -> ProxyFactory {
        let dir = dm
            .proxy_dir
            .clone()
            .unwrap_or_else(|| default_proxy_dir(dm.alias.as_str()));
        let namespace = dm
            .proxy_namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_PROXY_NAMESPACE.to_string());

        if self.development_mode {
            ProxyFactory::generating(dir, namespace, metadata)
        } else {
            ProxyFactory::compiled(dir, namespace)
        }
    }
}

fn check_unique<'a>(kind: &str, aliases: impl Iterator<Item = &'a Alias>) -> Result<()> {
    let mut seen = HashSet::new();
    for alias in aliases {
        if !seen.insert(alias) {
            return Err(ConfigError::DuplicateAlias {
                kind: kind.to_string(),
                alias: alias.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryClientFactory;
    use crate::domain::{ConnectionConfig, OptionValue, Options};

    fn builder() -> ServiceGraphBuilder {
        ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()))
    }

    fn two_connections() -> RegistryConfig {
        RegistryConfig::new()
            .with_connection(ConnectionConfig::new("c1", "E1").with_default_database("db1"))
            .with_connection(ConnectionConfig::new("c2", "E2").with_default_database("db2"))
    }

    #[test]
    fn test_no_connections() {
        let err = builder().build(&RegistryConfig::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoConnections));
    }

    #[test]
    fn test_synthesized_default_document_manager() {
        let registry = builder().build(&two_connections()).unwrap();

        assert_eq!(registry.default_connection(), "c1");
        assert_eq!(
            registry.document_manager_aliases().collect::<Vec<_>>(),
            vec!["default"]
        );
        assert_eq!(registry.connection_of("default").unwrap(), "c1");
        assert_eq!(registry.default_database().unwrap().name(), "db1");
        assert_eq!(registry.default_client().unwrap().endpoint(), "E1");
    }

    #[test]
    fn test_document_manager_database_from_its_connection() {
        let config = two_connections()
            .with_document_manager(DocumentManagerConfig::new("dm1").with_connection("c2"));
        let registry = builder().build(&config).unwrap();

        assert_eq!(registry.database("dm1").unwrap().name(), "db2");
        assert_eq!(registry.database("dm1").unwrap().endpoint(), "E2");
        assert_eq!(registry.default_document_manager_alias(), "dm1");
    }

    #[test]
    fn test_bulk_write_factory_follows_connection() {
        let config = two_connections()
            .with_document_manager(DocumentManagerConfig::new("dm1").with_connection("c2"))
            .with_document_manager(DocumentManagerConfig::new("dm2").with_connection("c2"))
            .with_document_manager(DocumentManagerConfig::new("dm3"));
        let registry = builder().build(&config).unwrap();

        let dm1 = registry.document_manager("dm1").unwrap();
        let dm2 = registry.document_manager("dm2").unwrap();
        let dm3 = registry.document_manager("dm3").unwrap();

        assert_eq!(dm1.bulk_write_factory().connection(), "c2");
        assert!(Arc::ptr_eq(dm1.bulk_write_factory(), dm2.bulk_write_factory()));
        assert_eq!(dm3.bulk_write_factory().connection(), "c1");
        assert_eq!(
            dm3.create_bulk_write_builder("posts").build().namespace(),
            "db1.posts"
        );
    }

    #[test]
    fn test_dangling_connection_reference() {
        let config = two_connections()
            .with_document_manager(DocumentManagerConfig::new("dm1").with_connection("missing"));

        match builder().build(&config) {
            Err(ConfigError::DanglingConnectionReference {
                document_manager,
                connection,
            }) => {
                assert_eq!(document_manager, "dm1");
                assert_eq!(connection, "missing");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_aliases() {
        let config = two_connections().with_connection(ConnectionConfig::new("c1", "E3"));
        let err = builder().build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAlias { ref kind, ref alias }
            if kind == "connection" && alias == "c1"));

        let config = two_connections()
            .with_document_manager(DocumentManagerConfig::new("dm"))
            .with_document_manager(DocumentManagerConfig::new("dm"));
        let err = builder().build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAlias { ref kind, .. } if kind == "document manager"));
    }

    #[test]
    fn test_explicit_defaults() {
        let config = two_connections()
            .with_default_connection("c2")
            .with_document_manager(DocumentManagerConfig::new("a"))
            .with_document_manager(DocumentManagerConfig::new("b"))
            .with_default_document_manager("b");
        let registry = builder().build(&config).unwrap();

        assert_eq!(registry.default_connection(), "c2");
        assert_eq!(registry.default_document_manager().unwrap().alias(), "b");
        assert_eq!(registry.database("a").unwrap().name(), "db2");
    }

    #[test]
    fn test_unknown_defaults() {
        let err = builder()
            .build(&two_connections().with_default_connection("c9"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefault { ref kind, .. } if kind == "connection"));

        let err = builder()
            .build(&two_connections().with_default_document_manager("dm9"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefault { ref kind, .. } if kind == "document manager"));
    }

    #[test]
    fn test_missing_database_and_endpoint() {
        let config = RegistryConfig::new().with_connection(ConnectionConfig::new("c1", "E1"));
        let err = builder().build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredOption { ref alias, ref field }
            if alias == "default" && field == "database"));

        let config = RegistryConfig::new().with_connection(ConnectionConfig::new("c1", " "));
        let err = builder().build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequiredOption { ref field, .. } if field == "endpoint"));
    }

    #[test]
    fn test_database_options_do_not_inherit_connection_options() {
        let mut write_concern = Options::new();
        write_concern.insert("w".to_string(), OptionValue::from("majority"));

        let config = RegistryConfig::new()
            .with_connection(
                ConnectionConfig::new("c1", "E1")
                    .with_default_database("db1")
                    .with_option("writeConcern", write_concern)
                    .with_option("appname", "blog"),
            )
            .with_document_manager(
                DocumentManagerConfig::new("dm").with_database_option("readConcern", "local"),
            );
        let registry = builder().build(&config).unwrap();

        let client = registry.client("c1").unwrap();
        assert!(client.options().write_concern.is_some());

        let database = registry.database("dm").unwrap();
        assert!(database.options().write_concern.is_none());
        assert!(database.options().get("appname").is_none());
        assert_eq!(database.options().read_concern.as_ref().unwrap().level, "local");
    }

    #[test]
    fn test_proxy_factory_follows_development_mode() {
        let config = two_connections()
            .with_document_manager(DocumentManagerConfig::new("dm").with_proxies("App::Proxies", "/p"));

        let registry = builder().build(&config).unwrap();
        let proxies = registry.document_manager("dm").unwrap().proxy_factory().clone();
        assert!(!proxies.is_generating());
        assert_eq!(proxies.namespace(), "App::Proxies");

        let registry = builder().development_mode(true).build(&config).unwrap();
        assert!(registry
            .document_manager("dm")
            .unwrap()
            .proxy_factory()
            .is_generating());
    }

    #[test]
    fn test_lookup_errors() {
        let registry = builder().build(&two_connections()).unwrap();
        assert!(matches!(
            registry.document_manager("nope").unwrap_err(),
            ConfigError::UnknownDocumentManager { .. }
        ));
        assert!(matches!(
            registry.client("nope").unwrap_err(),
            ConfigError::UnknownConnection { .. }
        ));
        assert!(registry.connection_of("nope").is_err());
    }
}
