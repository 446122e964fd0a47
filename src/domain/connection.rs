// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection configuration.

use crate::domain::alias::Alias;
use crate::domain::option_value::{OptionValue, Options};
use serde::{Deserialize, Serialize};

/// A configured endpoint backing one driver client.
///
/// Missing `options` and `driver_options` decode as empty mappings, so a
/// connection only needs an endpoint.
///
/// # Examples
///
/// ```
/// use odmwire::domain::ConnectionConfig;
///
/// let connection = ConnectionConfig::new("main", "mongodb://localhost:27017")
///     .with_default_database("app")
///     .with_option("appname", "blog");
///
/// assert_eq!(connection.alias.as_str(), "main");
/// assert_eq!(connection.default_database.as_deref(), Some("app"));
/// assert_eq!(connection.options.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// The key this connection is declared under.
    #[serde(skip)]
    pub alias: Alias,
    /// Connection string.
    pub endpoint: String,
    /// Database selected by document managers that don't name one.
    #[serde(default)]
    pub default_database: Option<String>,
    /// Driver options, including `readConcern`, `readPreference`, `writeConcern`.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub options: Options,
    /// Low-level transport options.
    #[serde(default, deserialize_with = "crate::domain::option_value::null_as_empty")]
    pub driver_options: Options,
}

impl ConnectionConfig {
    /// Creates a connection with no options.
    pub fn new(alias: impl Into<Alias>, endpoint: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the default database name.
    pub fn with_default_database(mut self, name: impl Into<String>) -> Self {
        self.default_database = Some(name.into());
        self
    }

    /// Adds a driver option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Adds a transport option.
    pub fn with_driver_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.driver_options.insert(key.into(), value.into());
        self
    }
}
