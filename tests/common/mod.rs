// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use odmwire::adapters::InMemoryClient;
use odmwire::domain::{
    ConnectionConfig, DocumentManagerConfig, Options, RegistryConfig, ResolvedOptions, Result,
};
use odmwire::ports::{ClientFactory, DatabaseClient};
use std::sync::{Arc, Mutex};

/// One `connect` call seen by a [`RecordingClientFactory`].
#[derive(Debug, Clone)]
pub struct Connect {
    pub endpoint: String,
    pub options: ResolvedOptions,
    pub driver_options: Options,
}

/// A client factory remembering every connection it was asked for.
#[derive(Debug, Default)]
pub struct RecordingClientFactory {
    calls: Mutex<Vec<Connect>>,
}

impl RecordingClientFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Connect> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.endpoint).collect()
    }
}

impl ClientFactory for RecordingClientFactory {
    fn name(&self) -> &str {
        "recording"
    }

    fn connect(
        &self,
        endpoint: &str,
        options: &ResolvedOptions,
        driver_options: &Options,
    ) -> Result<Arc<dyn DatabaseClient>> {
        self.calls.lock().unwrap().push(Connect {
            endpoint: endpoint.to_string(),
            options: options.clone(),
            driver_options: driver_options.clone(),
        });
        Ok(Arc::new(InMemoryClient::new(
            endpoint,
            options.clone(),
            driver_options.clone(),
        )))
    }
}

/// `c1 -> E1/db1`, `c2 -> E2/db2`, no document managers.
pub fn two_connections() -> RegistryConfig {
    RegistryConfig::new()
        .with_connection(ConnectionConfig::new("c1", "E1").with_default_database("db1"))
        .with_connection(ConnectionConfig::new("c2", "E2").with_default_database("db2"))
}

/// A document manager bound to `connection`.
pub fn dm_on(alias: &str, connection: &str) -> DocumentManagerConfig {
    DocumentManagerConfig::new(alias).with_connection(connection)
}
