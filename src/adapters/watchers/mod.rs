// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change detection for registry configuration documents.

#[cfg(feature = "reload")]
pub mod file_watcher;

#[cfg(feature = "reload")]
pub use file_watcher::FileWatcher;
