// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture crate wiring a MongoDB object-document mapper into
//! an application.
//!
//! This crate turns a configuration document describing named connections and
//! named document managers into a registry of driver clients, selected databases
//! and document managers. It validates references between them, propagates
//! defaults, and translates read concern, read preference and write concern
//! options into typed values. A CLI generates document and proxy sources for the
//! types a document manager has metadata for.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Configuration model, option translation, metadata, errors
//! - **Ports**: Traits for the driver, metadata, scanning, generation, parsing and watching
//! - **Adapters**: In-memory driver, mapping-backed metadata, filesystem scanner, YAML loader
//! - **Service**: The registry builder and the handles it produces
//!
//! # Features
//!
//! - **Defaults**: The first connection and document manager are the defaults unless overridden
//! - **Validation**: Dangling references, duplicate aliases and invalid options fail the build
//! - **Proxies**: Generated on demand in development mode, loaded from disk otherwise
//! - **Dynamic Reloading**: Watch the configuration file and rebuild the registry
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML configuration files (default)
//! - `cli`: Enable the `odmwire` command-line interface (default)
//! - `reload`: Enable dynamic reloading with file watching
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use odmwire::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let yaml = r#"
//! connections:
//!   main:
//!     endpoint: mongodb://localhost:27017
//!     default_database: blog
//!     options:
//!       readPreference: { mode: secondaryPreferred }
//! document_managers:
//!   default:
//!     database_options:
//!       writeConcern: { w: majority }
//! "#;
//!
//! let config = YamlParser::new().parse(yaml)?;
//! let registry = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()))
//!     .development_mode(true)
//!     .build(&config)?;
//!
//! let dm = registry.default_document_manager()?;
//! assert_eq!(dm.database().name(), "blog");
//! assert_eq!(dm.connection(), "main");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{InMemoryClientFactory, StaticMetadataFactory};
    pub use crate::domain::{
        Alias, ConfigError, ConnectionConfig, DocumentManagerConfig, RegistryConfig, Result,
    };
    pub use crate::ports::{
        ClientFactory, ConfigParser, ConfigWatcher, Database, DatabaseClient, MetadataFactory,
    };
    pub use crate::service::{DocumentManager, ProxyFactory, Registry, ServiceGraphBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlConfigFile, YamlParser};
    #[cfg(feature = "reload")]
    pub use crate::service::RegistryReloader;
}
