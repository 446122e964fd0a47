// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the log lines emitted while building registries.

use odmwire::domain::ConnectionConfig;
use odmwire::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured_at<T>(level: Level, f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.text())
}

fn config() -> RegistryConfig {
    RegistryConfig::new()
        .with_connection(ConnectionConfig::new("main", "E1").with_default_database("blog"))
        .with_document_manager(DocumentManagerConfig::new("default"))
}

#[test]
fn test_build_logs_summary() {
    let builder = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()));
    let (registry, logs) = captured_at(Level::INFO, || builder.build(&config()));

    assert!(registry.is_ok());
    assert!(logs.contains("INFO"));
    assert!(logs.contains("Built registry with 1 connections and 1 document managers"));
    assert!(logs.contains("'main' and 'default'"));
    assert!(!logs.contains("Registered document manager"));
}

#[test]
fn test_build_logs_each_document_manager_at_debug() {
    let builder = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()));
    let (_, logs) = captured_at(Level::DEBUG, || builder.build(&config()));

    assert!(logs.contains("Registered document manager 'default' on 'main.blog'"));
}

#[test]
fn test_failed_build_logs_nothing_at_info() {
    let builder = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()));
    let (result, logs) = captured_at(Level::INFO, || builder.build(&RegistryConfig::new()));

    assert!(matches!(result, Err(ConfigError::NoConnections)));
    assert!(!logs.contains("Built registry"));
}
