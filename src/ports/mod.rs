// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) for the collaborators the
//! registry and the code generators depend on: the database driver, the metadata
//! factory, source scanning and generation, configuration parsing and watching.
//! These traits are implemented by adapters in the adapters layer.

pub mod client;
pub mod generator;
pub mod metadata;
pub mod parser;
pub mod watcher;

// Re-export commonly used types
pub use client::{ClientFactory, Database, DatabaseClient};
pub use generator::{DeclaredType, DocumentGenerator, SourceScanner};
pub use metadata::MetadataFactory;
pub use parser::ConfigParser;
pub use watcher::{ChangeCallback, ConfigWatcher};
