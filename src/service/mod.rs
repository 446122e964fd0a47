// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: building and using the registry.
//!
//! This module contains the [`ServiceGraphBuilder`] that resolves a configuration
//! into a [`Registry`], the handles the registry holds, and the document and
//! proxy generators used by the CLI.

pub mod builder;
pub mod bulk;
pub mod document_manager;
pub mod generation;
pub mod proxy;
pub mod registry;
#[cfg(feature = "reload")]
pub mod reloader;

// Re-export commonly used types
pub use builder::ServiceGraphBuilder;
pub use bulk::{BulkWrite, BulkWriteBuilder, BulkWriteBuilderFactory, WriteModel};
pub use document_manager::DocumentManager;
pub use generation::{DocumentsGenerator, ProxiesGenerator};
pub use proxy::{default_proxy_dir, ProxyClass, ProxyFactory};
pub use registry::Registry;
#[cfg(feature = "reload")]
pub use reloader::RegistryReloader;
