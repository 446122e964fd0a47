// SPDX-License-Identifier: MIT OR Apache-2.0

//! The document manager handle.

use crate::domain::{Alias, DocumentMetadata, Result};
use crate::ports::{Database, MetadataFactory};
use crate::service::bulk::{BulkWriteBuilder, BulkWriteBuilderFactory};
use crate::service::proxy::ProxyFactory;
use std::sync::Arc;

/// A document manager: one database of one connection, with the metadata and
/// proxy factories of the documents stored there.
#[derive(Debug, Clone)]
pub struct DocumentManager {
    alias: Alias,
    connection: Alias,
    database: Arc<dyn Database>,
    metadata: Arc<dyn MetadataFactory>,
    proxies: ProxyFactory,
    bulk_writes: Arc<BulkWriteBuilderFactory>,
}

impl DocumentManager {
    /// Assembles a document manager from its collaborators.
    pub fn new(
        alias: Alias,
        connection: Alias,
        database: Arc<dyn Database>,
        metadata: Arc<dyn MetadataFactory>,
        proxies: ProxyFactory,
        bulk_writes: Arc<BulkWriteBuilderFactory>,
    ) -> Self {
        Self {
            alias,
            connection,
            database,
            metadata,
            proxies,
            bulk_writes,
        }
    }

    /// Alias of this document manager.
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Alias of the connection the database was selected from.
    pub fn connection(&self) -> &Alias {
        &self.connection
    }

    /// The selected database.
    pub fn database(&self) -> &Arc<dyn Database> {
        &self.database
    }

    /// The metadata factory.
    pub fn metadata_factory(&self) -> &Arc<dyn MetadataFactory> {
        &self.metadata
    }

    /// The proxy factory.
    pub fn proxy_factory(&self) -> &ProxyFactory {
        &self.proxies
    }

    /// The bulk write factory of this manager's connection.
    pub fn bulk_write_factory(&self) -> &Arc<BulkWriteBuilderFactory> {
        &self.bulk_writes
    }

    /// Metadata of `type_name`, or `NoMetadata` when it is not a mapped document.
    pub fn get_metadata(&self, type_name: &str) -> Result<DocumentMetadata> {
        self.metadata.get_metadata(type_name)
    }

    /// Creates an empty bulk write builder for `collection` in this database.
    pub fn create_bulk_write_builder(&self, collection: &str) -> BulkWriteBuilder {
        self.bulk_writes.create(self.database.name(), collection)
    }
}
