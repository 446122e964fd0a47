// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database driver ports.
//!
//! The registry never talks to a MongoDB server itself. It hands resolved options
//! to a [`ClientFactory`], keeps the [`DatabaseClient`] handles it gets back, and
//! selects one [`Database`] per document manager. Connection pooling, retries and
//! timeouts are the driver's business.

use crate::domain::{Options, ResolvedOptions, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// Creates driver clients from connection settings.
///
/// # Examples
///
/// ```rust
/// use odmwire::domain::{Options, ResolvedOptions, Result};
/// use odmwire::ports::{ClientFactory, DatabaseClient};
/// use odmwire::adapters::InMemoryClient;
/// use std::sync::Arc;
///
/// struct LocalOnly;
///
/// impl ClientFactory for LocalOnly {
///     fn name(&self) -> &str {
///         "local-only"
///     }
///
///     fn connect(
///         &self,
///         endpoint: &str,
///         options: &ResolvedOptions,
///         driver_options: &Options,
///     ) -> Result<Arc<dyn DatabaseClient>> {
///         Ok(Arc::new(InMemoryClient::new(endpoint, options.clone(), driver_options.clone())))
///     }
/// }
///
/// let client = LocalOnly
///     .connect("mongodb://localhost", &ResolvedOptions::default(), &Options::new())
///     .unwrap();
/// assert_eq!(client.endpoint(), "mongodb://localhost");
/// ```
pub trait ClientFactory: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Creates a client for `endpoint`.
    ///
    /// Implementations should not perform network I/O here; drivers connect
    /// lazily on first use.
    fn connect(
        &self,
        endpoint: &str,
        options: &ResolvedOptions,
        driver_options: &Options,
    ) -> Result<Arc<dyn DatabaseClient>>;
}

/// A driver client bound to one endpoint.
pub trait DatabaseClient: Send + Sync + Debug {
    /// The connection string the client was created with.
    fn endpoint(&self) -> &str;

    /// Client-level options.
    fn options(&self) -> &ResolvedOptions;

    /// Transport options.
    fn driver_options(&self) -> &Options;

    /// Selects a database, applying `options` on top of the client's.
    fn select_database(&self, name: &str, options: &ResolvedOptions)
        -> Result<Arc<dyn Database>>;
}

/// A selected database with bound options.
pub trait Database: Send + Sync + Debug {
    /// Database name.
    fn name(&self) -> &str;

    /// Options given when the database was selected.
    fn options(&self) -> &ResolvedOptions;

    /// Endpoint of the client the database was selected from.
    fn endpoint(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ClientFactory>();
        assert_send_sync::<dyn DatabaseClient>();
        assert_send_sync::<dyn Database>();
    }
}
