// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading registries from YAML files.

#![cfg(feature = "yaml")]

use odmwire::adapters::EnvInterpolator;
use odmwire::domain::{Acknowledgment, ConfigError, ReadPreferenceMode};
use odmwire::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn builder() -> ServiceGraphBuilder {
    ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()))
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("odmwire.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_registry_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
connections:
  reporting:
    endpoint: mongodb://reporting:27017
    default_database: reports
    options:
      readPreference:
        mode: nearest
        options: { maxStalenessSeconds: 90 }
  main:
    endpoint: mongodb://main:27017
    default_database: app
document_managers:
  default:
    connection: main
    database_options:
      readConcern: majority
      writeConcern: { w: majority, wTimeout: 1000, journal: true }
  analytics: ~
"#,
    );

    let file = YamlConfigFile::from_file(&path).unwrap();
    let registry = builder().build(file.config()).unwrap();

    assert_eq!(registry.default_connection(), "reporting");
    assert_eq!(registry.default_document_manager_alias(), "default");

    let preference = registry
        .client("reporting")
        .unwrap()
        .options()
        .read_preference
        .clone()
        .unwrap();
    assert_eq!(preference.mode, ReadPreferenceMode::Nearest);
    assert_eq!(preference.max_staleness_seconds, Some(90));

    let default_db = registry.default_database().unwrap();
    assert_eq!(default_db.name(), "app");
    assert_eq!(default_db.endpoint(), "mongodb://main:27017");
    let concern = default_db.options().write_concern.clone().unwrap();
    assert_eq!(concern.w, Acknowledgment::Majority);
    assert_eq!(concern.w_timeout, 1000);
    assert!(concern.journal);
    assert_eq!(
        default_db.options().read_concern.as_ref().unwrap().level,
        "majority"
    );

    // `analytics: ~` inherits the default connection and its database
    assert_eq!(registry.connection_of("analytics").unwrap(), "reporting");
    assert_eq!(registry.database("analytics").unwrap().name(), "reports");
}

#[test]
fn test_duplicate_alias_in_yaml_is_reported() {
    let yaml = r#"
connections:
  main: { endpoint: E1, default_database: db1 }
document_managers:
  dm: { database: a }
  dm: { database: b }
"#;
    let config = YamlParser::new().parse(yaml).unwrap();
    let err = builder().build(&config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::DuplicateAlias { ref kind, ref alias } if kind == "document manager" && alias == "dm"
    ));
}

#[test]
fn test_empty_connection_entry_is_missing_endpoint() {
    let config = YamlParser::new().parse("connections:\n  main: ~\n").unwrap();
    let err = builder().build(&config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingRequiredOption { ref alias, ref field } if alias == "main" && field == "endpoint"
    ));
}

#[test]
fn test_endpoint_from_environment() {
    let mut vars = HashMap::new();
    vars.insert("ODM_HOST".to_string(), "db.internal".to_string());
    let parser = YamlParser::with_env(EnvInterpolator::with_values(vars));

    let config = parser
        .parse(
            "connections:\n  main:\n    endpoint: mongodb://${ODM_HOST}:27017\n    default_database: ${ODM_DB:-app}\n",
        )
        .unwrap();
    let registry = builder().build(&config).unwrap();

    assert_eq!(
        registry.default_client().unwrap().endpoint(),
        "mongodb://db.internal:27017"
    );
    assert_eq!(registry.default_database().unwrap().name(), "app");
}

#[test]
fn test_missing_environment_variable_fails_parsing() {
    let parser = YamlParser::with_env(EnvInterpolator::with_values(HashMap::new()));
    let err = parser
        .parse("connections:\n  main:\n    endpoint: ${ODM_URL}\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_heartbeat_floor() {
    let yaml = r#"
connections:
  main:
    endpoint: E1
    default_database: app
    options: { heartbeatFrequencyMS: 100 }
"#;
    let config = YamlParser::new().parse(yaml).unwrap();
    let err = builder().build(&config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidOption { ref field, .. } if field == "heartbeatFrequencyMS"
    ));
}
