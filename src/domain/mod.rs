// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and rules.
//!
//! This module holds the configuration model (connections, document managers,
//! the registry configuration), option translation, document metadata and the
//! error type. It performs no I/O and depends on no adapter.

pub mod alias;
pub mod concerns;
pub mod connection;
pub mod document_manager;
pub mod errors;
pub mod metadata;
pub mod option_value;
pub mod registry_config;

// Re-export commonly used types
pub use alias::Alias;
pub use concerns::{
    translate_options, Acknowledgment, ReadConcern, ReadPreference, ReadPreferenceMode,
    ResolvedOptions, WriteConcern,
};
pub use connection::ConnectionConfig;
pub use document_manager::DocumentManagerConfig;
pub use errors::{ConfigError, Result};
pub use metadata::{DocumentMapping, DocumentMetadata, FieldMapping};
pub use option_value::{OptionValue, Options};
pub use registry_config::RegistryConfig;
