// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration watcher trait definition.
//!
//! This module defines the `ConfigWatcher` trait, which provides an interface for
//! watching a configuration document for changes so the registry can be rebuilt.

use crate::domain::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// The callback receives the path of the document that changed.
pub type ChangeCallback = Arc<dyn Fn(PathBuf) + Send + Sync>;

/// A trait for watching configuration documents for changes.
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use odmwire::ports::{ChangeCallback, ConfigWatcher};
/// use odmwire::domain::Result;
///
/// struct ManualWatcher {
///     callback: Option<ChangeCallback>,
/// }
///
/// impl ConfigWatcher for ManualWatcher {
///     fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
///         self.callback = Some(callback);
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         self.callback = None;
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigWatcher: Send + Sync {
    /// Starts watching. The callback should be non-blocking to avoid delaying the watcher.
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching and releases the watcher's resources.
    fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct TestWatcher {
        callback: Option<ChangeCallback>,
    }

    impl ConfigWatcher for TestWatcher {
        fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
            self.callback = Some(callback);
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.callback = None;
            Ok(())
        }
    }

    #[test]
    fn test_watcher_callback_invocation() {
        let mut watcher = TestWatcher { callback: None };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        watcher
            .watch(Arc::new(move |path: PathBuf| {
                seen_clone.lock().unwrap().push(path);
            }))
            .unwrap();

        if let Some(callback) = &watcher.callback {
            callback(PathBuf::from("odmwire.yaml"));
        }

        assert_eq!(*seen.lock().unwrap(), vec![PathBuf::from("odmwire.yaml")]);
    }

    #[test]
    fn test_watcher_stop() {
        let mut watcher = TestWatcher {
            callback: Some(Arc::new(|_| {})),
        };
        assert!(watcher.stop().is_ok());
        assert!(watcher.callback.is_none());
    }

    #[test]
    fn test_watcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConfigWatcher>>();
    }
}
