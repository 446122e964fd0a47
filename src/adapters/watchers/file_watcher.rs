// SPDX-License-Identifier: MIT OR Apache-2.0

//! Watching a registry configuration file for edits.
//!
//! Editors rarely write a file once: they truncate, write, rename a swap file
//! over it, touch metadata. The watcher folds such a burst into one callback,
//! fired once the file has been quiet for the debounce delay, so the registry is
//! rebuilt from the finished file rather than from a half-written one.

use crate::domain::{ConfigError, Result};
use crate::ports::{ChangeCallback, ConfigWatcher};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

enum Signal {
    Fs(notify::Result<Event>),
    Stop,
}

struct Running {
    _watcher: RecommendedWatcher,
    signals: Sender<Signal>,
    thread: JoinHandle<()>,
}

/// Calls back with the file's path after each settled burst of changes.
///
/// # Examples
///
/// ```rust,no_run
/// use odmwire::adapters::FileWatcher;
/// use odmwire::ports::ConfigWatcher;
/// use std::sync::Arc;
///
/// # fn main() -> odmwire::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/etc/blog/odmwire.yaml", None)?;
/// watcher.watch(Arc::new(|path| {
///     println!("{} changed, rebuilding registry", path.display());
/// }))?;
///
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
pub struct FileWatcher {
    file_path: PathBuf,
    debounce_delay: Duration,
    running: Option<Running>,
}

impl fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWatcher")
            .field("file_path", &self.file_path)
            .field("debounce_delay", &self.debounce_delay)
            .field("running", &self.running.is_some())
            .finish()
    }
}

impl FileWatcher {
    /// Creates a watcher for an existing file.
    ///
    /// The debounce delay defaults to 500ms.
    pub fn new(path: impl AsRef<Path>, debounce_delay: Option<Duration>) -> Result<Self> {
        let path = path.as_ref();
        let file_path = path.canonicalize().map_err(|e| ConfigError::WatcherError {
            message: format!("Cannot watch {}: file not found", path.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            file_path,
            debounce_delay: debounce_delay.unwrap_or(DEFAULT_DEBOUNCE),
            running: None,
        })
    }

    /// The watched file, canonicalized.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn watch_error(message: &str, e: notify::Error) -> ConfigError {
        ConfigError::WatcherError {
            message: format!("{}: {}", message, e),
            source: Some(Box::new(e)),
        }
    }
}

/// Whether `event` changed the file named `name` in the watched directory.
fn touches(event: &Event, name: &OsString) -> bool {
    let changing = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    changing
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(name.as_os_str()))
}

fn run(file_path: PathBuf, delay: Duration, signals: Receiver<Signal>, callback: ChangeCallback) {
    let Some(name) = file_path.file_name().map(OsString::from) else {
        return;
    };
    let mut pending: Option<Instant> = None;

    loop {
        let signal = match pending {
            Some(since) => signals.recv_timeout(delay.saturating_sub(since.elapsed())),
            None => signals.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match signal {
            Ok(Signal::Fs(Ok(event))) => {
                if touches(&event, &name) {
                    pending = Some(Instant::now());
                }
            }
            Ok(Signal::Fs(Err(e))) => tracing::warn!("Error watching {}: {}", file_path.display(), e),
            Err(RecvTimeoutError::Timeout) => {
                pending = None;
                tracing::debug!("Configuration file changed: {}", file_path.display());
                callback(file_path.clone());
            }
            Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Signals the loop to stop and waits for it, unless called from the loop's own
/// thread (a callback dropping the last owner), where the loop exits on return.
fn stop_running(running: Running) -> Result<()> {
    let _ = running.signals.send(Signal::Stop);
    if running.thread.thread().id() == thread::current().id() {
        return Ok(());
    }
    running.thread.join().map_err(|_| ConfigError::WatcherError {
        message: "File watcher thread panicked".to_string(),
        source: None,
    })
}

impl ConfigWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.running.is_some() {
            return Err(ConfigError::WatcherError {
                message: format!("Already watching {}", self.file_path.display()),
                source: None,
            });
        }

        let directory = self
            .file_path
            .parent()
            .ok_or_else(|| ConfigError::WatcherError {
                message: format!("{} has no parent directory", self.file_path.display()),
                source: None,
            })?
            .to_path_buf();

        let (signals, receiver) = channel();
        let events = signals.clone();
        let mut watcher = RecommendedWatcher::new(
            move |event| {
                let _ = events.send(Signal::Fs(event));
            },
            notify::Config::default(),
        )
        .map_err(|e| Self::watch_error("Failed to create file watcher", e))?;

        // Renames over the file replace its inode, so watch the directory
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| Self::watch_error("Failed to start watching", e))?;

        let file_path = self.file_path.clone();
        let delay = self.debounce_delay;
        let thread = thread::spawn(move || run(file_path, delay, receiver, callback));

        self.running = Some(Running {
            _watcher: watcher,
            signals,
            thread,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        match self.running.take() {
            Some(running) => stop_running(running),
            None => Ok(()),
        }
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
