// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: an in-memory driver client, a mapping-backed metadata factory,
//! a filesystem source scanner, a Rust document generator, the YAML
//! configuration loader and, with the `reload` feature, a file watcher.

pub mod env_interpolation;
pub mod fs_scanner;
pub mod memory_client;
pub mod rust_generator;
pub mod static_metadata;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub mod watchers;

// Re-export adapters based on feature flags
pub use env_interpolation::EnvInterpolator;
pub use fs_scanner::FsSourceScanner;
pub use memory_client::{InMemoryClient, InMemoryClientFactory, SelectedDatabase};
pub use rust_generator::RustDocumentGenerator;
pub use static_metadata::StaticMetadataFactory;
#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlConfigFile, YamlParser};
