// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built service graph.

use crate::domain::{Alias, ConfigError, Result};
use crate::ports::{Database, DatabaseClient};
use crate::service::document_manager::DocumentManager;
use indexmap::IndexMap;
use std::sync::Arc;

/// Clients, databases and document managers, keyed by alias.
///
/// A registry is only ever produced complete by
/// [`ServiceGraphBuilder`](crate::service::ServiceGraphBuilder): every document
/// manager's connection has a client and both defaults resolve.
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) clients: IndexMap<Alias, Arc<dyn DatabaseClient>>,
    pub(crate) databases: IndexMap<Alias, Arc<dyn Database>>,
    pub(crate) document_managers: IndexMap<Alias, Arc<DocumentManager>>,
    pub(crate) default_connection: Alias,
    pub(crate) default_document_manager: Alias,
}

impl Registry {
    /// Client of the connection `alias`.
    pub fn client(&self, alias: &str) -> Result<Arc<dyn DatabaseClient>> {
        self.clients
            .get(alias)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownConnection {
                alias: alias.to_string(),
            })
    }

    /// Database of the document manager `alias`.
    pub fn database(&self, alias: &str) -> Result<Arc<dyn Database>> {
        self.databases
            .get(alias)
            .cloned()
            .ok_or_else(|| unknown_document_manager(alias))
    }

    /// Document manager `alias`.
    pub fn document_manager(&self, alias: &str) -> Result<Arc<DocumentManager>> {
        self.document_managers
            .get(alias)
            .cloned()
            .ok_or_else(|| unknown_document_manager(alias))
    }

    /// Alias of the connection a document manager uses.
    pub fn connection_of(&self, document_manager: &str) -> Result<&Alias> {
        self.document_managers
            .get(document_manager)
            .map(|dm| dm.connection())
            .ok_or_else(|| unknown_document_manager(document_manager))
    }

    /// Alias of the default connection.
    pub fn default_connection(&self) -> &Alias {
        &self.default_connection
    }

    /// Alias of the default document manager.
    pub fn default_document_manager_alias(&self) -> &Alias {
        &self.default_document_manager
    }

    /// Client of the default connection.
    pub fn default_client(&self) -> Result<Arc<dyn DatabaseClient>> {
        self.client(self.default_connection.as_str())
    }

    /// Database of the default document manager.
    pub fn default_database(&self) -> Result<Arc<dyn Database>> {
        self.database(self.default_document_manager.as_str())
    }

    /// The default document manager.
    pub fn default_document_manager(&self) -> Result<Arc<DocumentManager>> {
        self.document_manager(self.default_document_manager.as_str())
    }

    /// Connection aliases in declaration order.
    pub fn connection_aliases(&self) -> impl Iterator<Item = &Alias> {
        self.clients.keys()
    }

    /// Document manager aliases in declaration order.
    pub fn document_manager_aliases(&self) -> impl Iterator<Item = &Alias> {
        self.document_managers.keys()
    }

    /// All document managers in declaration order.
    pub fn document_managers(&self) -> impl Iterator<Item = &Arc<DocumentManager>> {
        self.document_managers.values()
    }
}

fn unknown_document_manager(alias: &str) -> ConfigError {
    ConfigError::UnknownDocumentManager {
        alias: alias.to_string(),
    }
}
