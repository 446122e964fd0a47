// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory driver adapter.
//!
//! This adapter records the endpoint and resolved options a client is created
//! with and never opens a socket. The CLI uses it, since code generation needs the
//! registry's metadata and proxy factories but no live database, and tests use it
//! to inspect what the builder handed to the driver.

use crate::domain::{Options, ResolvedOptions, Result};
use crate::ports::{ClientFactory, Database, DatabaseClient};
use std::sync::Arc;

/// Client factory producing [`InMemoryClient`]s.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::InMemoryClientFactory;
/// use odmwire::domain::{Options, ResolvedOptions};
/// use odmwire::ports::ClientFactory;
///
/// let factory = InMemoryClientFactory::new();
/// let client = factory
///     .connect("mongodb://localhost:27017", &ResolvedOptions::default(), &Options::new())
///     .unwrap();
/// let db = client.select_database("app", &ResolvedOptions::default()).unwrap();
/// assert_eq!(db.name(), "app");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientFactory;

impl InMemoryClientFactory {
    /// Creates a new factory.
    pub fn new() -> Self {
        InMemoryClientFactory
    }
}

impl ClientFactory for InMemoryClientFactory {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn connect(
        &self,
        endpoint: &str,
        options: &ResolvedOptions,
        driver_options: &Options,
    ) -> Result<Arc<dyn DatabaseClient>> {
        Ok(Arc::new(InMemoryClient::new(
            endpoint,
            options.clone(),
            driver_options.clone(),
        )))
    }
}

/// A client that only remembers how it was configured.
#[derive(Debug, Clone)]
pub struct InMemoryClient {
    endpoint: String,
    options: ResolvedOptions,
    driver_options: Options,
}

impl InMemoryClient {
    /// Creates a client for `endpoint`.
    pub fn new(endpoint: impl Into<String>, options: ResolvedOptions, driver_options: Options) -> Self {
        Self {
            endpoint: endpoint.into(),
            options,
            driver_options,
        }
    }
}

impl DatabaseClient for InMemoryClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    fn driver_options(&self) -> &Options {
        &self.driver_options
    }

    fn select_database(
        &self,
        name: &str,
        options: &ResolvedOptions,
    ) -> Result<Arc<dyn Database>> {
        Ok(Arc::new(SelectedDatabase {
            name: name.to_string(),
            endpoint: self.endpoint.clone(),
            options: options.clone(),
        }))
    }
}

/// A database selected from an [`InMemoryClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedDatabase {
    name: String,
    endpoint: String,
    options: ResolvedOptions,
}

impl Database for SelectedDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
