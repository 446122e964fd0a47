// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry hot reload.
//!
//! The reloader keeps the current registry behind a lock and swaps in a new one
//! when the configuration file changes. Readers hold an `Arc` to the registry
//! they got, so a swap never invalidates handles in use.

use crate::adapters::{FileWatcher, YamlConfigFile};
use crate::domain::{ConfigError, RegistryConfig, Result};
use crate::ports::ConfigWatcher;
use crate::service::builder::ServiceGraphBuilder;
use crate::service::registry::Registry;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

fn poisoned(what: &str) -> ConfigError {
    ConfigError::WatcherError {
        message: format!("{} lock poisoned", what),
        source: None,
    }
}

/// Rebuilds the registry whenever its configuration file changes.
///
/// A failed reload leaves the previous registry active.
///
/// # Examples
///
/// ```rust,no_run
/// use odmwire::adapters::{InMemoryClientFactory, YamlConfigFile};
/// use odmwire::service::{RegistryReloader, ServiceGraphBuilder};
/// use std::sync::Arc;
///
/// # fn main() -> odmwire::domain::Result<()> {
/// let builder = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()));
/// let reloader = Arc::new(RegistryReloader::new(builder, YamlConfigFile::from_file("odmwire.yaml")?)?);
/// reloader.watch(None)?;
///
/// let registry = reloader.registry();
/// println!("default document manager: {}", registry.default_document_manager_alias());
/// # Ok(())
/// # }
/// ```
pub struct RegistryReloader {
    builder: ServiceGraphBuilder,
    file: Mutex<YamlConfigFile>,
    current: RwLock<Arc<Registry>>,
    watcher: Mutex<Option<FileWatcher>>,
}

impl RegistryReloader {
    /// Builds the initial registry from `file`.
    pub fn new(builder: ServiceGraphBuilder, file: YamlConfigFile) -> Result<Self> {
        let registry = builder.build(file.config())?;
        Ok(Self {
            builder,
            file: Mutex::new(file),
            current: RwLock::new(Arc::new(registry)),
            watcher: Mutex::new(None),
        })
    }

    /// The active registry.
    pub fn registry(&self) -> Arc<Registry> {
        match self.current.read() {
            Ok(current) => Arc::clone(&current),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// The configuration the active registry was built from.
    pub fn config(&self) -> Result<RegistryConfig> {
        let file = self.file.lock().map_err(|_| poisoned("configuration file"))?;
        Ok(file.config().clone())
    }

    /// Re-reads the configuration file and swaps in the rebuilt registry.
    ///
    /// The file's configuration and the registry are replaced together, and
    /// only when the new configuration builds.
    pub fn reload(&self) -> Result<()> {
        let mut file = self.file.lock().map_err(|_| poisoned("configuration file"))?;
        let (config, rebuilt) = file
            .read()
            .and_then(|config| {
                let rebuilt = self.builder.build(&config)?;
                Ok((config, rebuilt))
            })
            .map_err(|e| {
                tracing::warn!(
                    "Failed to reload {}, keeping the previous registry: {}",
                    file.file_path().display(),
                    e
                );
                e
            })?;

        let mut current = self.current.write().map_err(|_| poisoned("registry"))?;
        file.set_config(config);
        *current = Arc::new(rebuilt);
        tracing::info!("Registry reloaded");
        Ok(())
    }

    /// Starts watching the configuration file, reloading on every change.
    pub fn watch(self: &Arc<Self>, debounce_delay: Option<Duration>) -> Result<()> {
        let path = self
            .file
            .lock()
            .map_err(|_| poisoned("configuration file"))?
            .file_path()
            .to_path_buf();
        let mut watcher = FileWatcher::new(&path, debounce_delay)?;

        let reloader = Arc::downgrade(self);
        watcher.watch(Arc::new(move |_path| {
            if let Some(reloader) = reloader.upgrade() {
                // Failures are logged by reload and the previous registry stays active
                let _ = reloader.reload();
            }
        }))?;

        let mut slot = self.watcher.lock().map_err(|_| poisoned("watcher"))?;
        if let Some(mut previous) = slot.replace(watcher) {
            previous.stop()?;
        }
        Ok(())
    }

    /// Stops watching, if watching.
    pub fn stop(&self) -> Result<()> {
        let watcher = self.watcher.lock().map_err(|_| poisoned("watcher"))?.take();
        match watcher {
            Some(mut watcher) => watcher.stop(),
            None => Ok(()),
        }
    }
}
