// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for building registries from configuration.

mod common;

use common::{dm_on, two_connections, RecordingClientFactory};
use odmwire::domain::{Acknowledgment, ConfigError, ConnectionConfig, OptionValue, Options, ReadPreferenceMode};
use odmwire::prelude::*;
use std::sync::Arc;

fn read_preference(mode: &str, staleness: Option<i64>) -> OptionValue {
    let mut tag_set = Options::new();
    tag_set.insert("region".to_string(), OptionValue::from("us"));

    let mut value = Options::new();
    value.insert("mode".to_string(), OptionValue::from(mode));
    value.insert("tagSets".to_string(), OptionValue::List(vec![OptionValue::Map(tag_set)]));
    if let Some(staleness) = staleness {
        let mut options = Options::new();
        options.insert("maxStalenessSeconds".to_string(), OptionValue::from(staleness));
        value.insert("options".to_string(), OptionValue::Map(options));
    }
    OptionValue::Map(value)
}

#[test]
fn test_first_connection_is_default_and_default_dm_is_synthesized() {
    let factory = RecordingClientFactory::new();
    let registry = ServiceGraphBuilder::new(factory.clone())
        .build(&two_connections())
        .unwrap();

    assert_eq!(registry.default_connection(), "c1");
    assert_eq!(registry.document_manager_aliases().count(), 1);

    let dm = registry.default_document_manager().unwrap();
    assert_eq!(dm.alias(), "default");
    assert_eq!(dm.connection(), "c1");
    assert_eq!(dm.database().name(), "db1");

    assert_eq!(factory.endpoints(), vec!["E1", "E2"]);
}

#[test]
fn test_document_manager_database_defaults_to_its_connection() {
    let config = two_connections().with_document_manager(dm_on("dm1", "c2"));
    let registry = ServiceGraphBuilder::new(RecordingClientFactory::new())
        .build(&config)
        .unwrap();

    assert_eq!(registry.database("dm1").unwrap().name(), "db2");
    assert_eq!(registry.connection_of("dm1").unwrap(), "c2");
    assert!(registry.document_manager("default").is_err());
}

#[test]
fn test_dangling_connection_reference_returns_no_registry() {
    let config = two_connections().with_document_manager(dm_on("dm1", "missing"));
    let result = ServiceGraphBuilder::new(RecordingClientFactory::new()).build(&config);

    match result {
        Err(ConfigError::DanglingConnectionReference {
            document_manager,
            connection,
        }) => {
            assert_eq!(document_manager, "dm1");
            assert_eq!(connection, "missing");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("a registry was built from a dangling reference"),
    }
}

#[test]
fn test_build_is_idempotent() {
    let config = two_connections()
        .with_document_manager(dm_on("dm1", "c2"))
        .with_document_manager(DocumentManagerConfig::new("dm2").with_database("reports"));
    let builder = ServiceGraphBuilder::new(RecordingClientFactory::new());

    let first = builder.build(&config).unwrap();
    let second = builder.build(&config).unwrap();

    assert!(first.connection_aliases().eq(second.connection_aliases()));
    assert!(first
        .document_manager_aliases()
        .eq(second.document_manager_aliases()));
    assert_eq!(first.default_connection(), second.default_connection());
    assert_eq!(
        first.default_document_manager_alias(),
        second.default_document_manager_alias()
    );
    for alias in ["dm1", "dm2"] {
        assert_eq!(
            first.database(alias).unwrap().name(),
            second.database(alias).unwrap().name()
        );
    }
}

#[test]
fn test_read_preference_is_translated_for_the_driver() {
    let config = RegistryConfig::new().with_connection(
        ConnectionConfig::new("main", "mongodb://replica")
            .with_default_database("app")
            .with_option("readPreference", read_preference("secondaryPreferred", Some(120)))
            .with_option("appname", "blog"),
    );
    let factory = RecordingClientFactory::new();
    ServiceGraphBuilder::new(factory.clone()).build(&config).unwrap();

    let calls = factory.calls();
    let preference = calls[0].options.read_preference.clone().unwrap();
    assert_eq!(preference.mode, ReadPreferenceMode::SecondaryPreferred);
    assert_eq!(preference.mode.driver_constant(), 6);
    assert_eq!(preference.tag_sets.len(), 1);
    assert_eq!(preference.tag_sets[0]["region"], OptionValue::from("us"));
    assert_eq!(preference.max_staleness_seconds, Some(120));
    assert_eq!(calls[0].options.get("appname"), Some(&OptionValue::from("blog")));
    assert!(calls[0].options.get("readPreference").is_none());
}

#[test]
fn test_low_staleness_is_rejected() {
    let config = RegistryConfig::new().with_connection(
        ConnectionConfig::new("main", "E1")
            .with_default_database("app")
            .with_option("readPreference", read_preference("secondary", Some(89))),
    );
    let err = ServiceGraphBuilder::new(RecordingClientFactory::new())
        .build(&config)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOption { ref alias, .. } if alias == "main"));
}

#[test]
fn test_invalid_read_preference_mode() {
    let config = RegistryConfig::new().with_connection(
        ConnectionConfig::new("main", "E1")
            .with_default_database("app")
            .with_option("readPreference", read_preference("fastest", None)),
    );
    let err = ServiceGraphBuilder::new(RecordingClientFactory::new())
        .build(&config)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidReadPreferenceMode { ref mode, .. } if mode.as_deref() == Some("fastest")
    ));
}

#[test]
fn test_write_concern_on_database_options() {
    let mut write_concern = Options::new();
    write_concern.insert("w".to_string(), OptionValue::from(2));
    write_concern.insert("wTimeout".to_string(), OptionValue::from(500));

    let config = two_connections().with_document_manager(
        DocumentManagerConfig::new("dm").with_database_option("writeConcern", write_concern),
    );
    let registry = ServiceGraphBuilder::new(RecordingClientFactory::new())
        .build(&config)
        .unwrap();

    let concern = registry
        .database("dm")
        .unwrap()
        .options()
        .write_concern
        .clone()
        .unwrap();
    assert_eq!(concern.w, Acknowledgment::Nodes(2));
    assert_eq!(concern.w_timeout, 500);
    assert!(!concern.journal);
}

#[test]
fn test_write_concern_without_w_is_rejected() {
    let config = two_connections().with_document_manager(
        DocumentManagerConfig::new("dm").with_database_option("writeConcern", Options::new()),
    );
    let err = ServiceGraphBuilder::new(RecordingClientFactory::new())
        .build(&config)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingRequiredOption { ref alias, .. } if alias == "dm"
    ));
}

#[test]
fn test_driver_options_pass_through() {
    let config = RegistryConfig::new().with_connection(
        ConnectionConfig::new("main", "E1")
            .with_default_database("app")
            .with_driver_option("ca_file", "/etc/ssl/ca.pem"),
    );
    let factory = RecordingClientFactory::new();
    ServiceGraphBuilder::new(factory.clone()).build(&config).unwrap();

    assert_eq!(
        factory.calls()[0].driver_options.get("ca_file"),
        Some(&OptionValue::from("/etc/ssl/ca.pem"))
    );
}

#[test]
fn test_bulk_write_builder_from_document_manager() {
    let registry = ServiceGraphBuilder::new(Arc::new(InMemoryClientFactory::new()))
        .build(&two_connections())
        .unwrap();
    let dm = registry.default_document_manager().unwrap();

    let mut builder = dm.create_bulk_write_builder("posts");
    builder.insert_one(Options::new());
    let bulk = builder.build();

    assert_eq!(bulk.namespace(), "db1.posts");
    assert_eq!(bulk.models.len(), 1);
}
