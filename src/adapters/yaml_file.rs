// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file adapter.
//!
//! This module provides the YAML parser for registry configuration documents and
//! an adapter that loads (and reloads) such a document from disk.

use crate::adapters::env_interpolation::EnvInterpolator;
use crate::domain::{ConfigError, RegistryConfig, Result};
use crate::ports::ConfigParser;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File name looked up in the OS configuration directory.
pub const DEFAULT_CONFIG_FILE: &str = "odmwire.yaml";

/// YAML parser implementation.
///
/// Environment references in string values are expanded once the document is
/// decoded. Mapping order is preserved and repeated aliases are kept for the
/// builder to report.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::YamlParser;
/// use odmwire::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml = "connections:\n  main:\n    endpoint: mongodb://localhost\n    default_database: app\n";
/// let config = parser.parse(yaml).unwrap();
/// assert_eq!(config.connections[0].alias.as_str(), "main");
/// assert_eq!(config.connections[0].default_database.as_deref(), Some("app"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser {
    env: EnvInterpolator,
}

impl YamlParser {
    /// Creates a YAML parser reading the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a YAML parser with a specific interpolator.
    pub fn with_env(env: EnvInterpolator) -> Self {
        Self { env }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<RegistryConfig> {
        let mut config: RegistryConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;
        self.env.interpolate_config(&mut config)?;
        Ok(config)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// A registry configuration loaded from a YAML file.
///
/// # Examples
///
/// ```rust,no_run
/// use odmwire::adapters::YamlConfigFile;
///
/// // Load from a specific file
/// let file = YamlConfigFile::from_file("/etc/myapp/odmwire.yaml").unwrap();
/// println!("{} connections", file.config().connections.len());
///
/// // Load from default OS location
/// let file = YamlConfigFile::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlConfigFile {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Decoded configuration
    config: RegistryConfig,
    /// YAML parser
    parser: YamlParser,
}

impl YamlConfigFile {
    /// Loads the configuration from a specific file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_parser(path, YamlParser::new())
    }

    /// Loads the configuration using a specific parser.
    pub fn from_file_with_parser<P: AsRef<Path>>(path: P, parser: YamlParser) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        // Reloads and watchers resolve against the canonical path
        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(&file_path)),
            source: Some(Box::new(e)),
        })?;

        let config = read_config(&canonical_path, &parser)?;

        Ok(Self {
            file_path: canonical_path,
            config,
            parser,
        })
    }

    /// Loads `odmwire.yaml` from the OS-appropriate configuration directory.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_file(proj_dirs.config_dir().join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the decoded configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Consumes the adapter, returning the configuration.
    pub fn into_config(self) -> RegistryConfig {
        self.config
    }

    /// Reads and decodes the file again without replacing the held configuration.
    pub fn read(&self) -> Result<RegistryConfig> {
        read_config(&self.file_path, &self.parser)
    }

    /// Replaces the held configuration.
    pub fn set_config(&mut self, config: RegistryConfig) {
        self.config = config;
    }

    /// Re-reads the file. On failure the previous configuration is kept.
    pub fn reload(&mut self) -> Result<()> {
        let config = self.read()?;
        self.set_config(config);
        Ok(())
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn read_config(path: &Path, parser: &YamlParser) -> Result<RegistryConfig> {
    // Size is checked before reading
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: "yaml-file".to_string(),
        message: format!("Failed to read file metadata: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: "yaml-file".to_string(),
        message: format!("Failed to read configuration file: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    let config = parser.parse(&content)?;
    tracing::debug!(
        "Loaded {} connections and {} document managers from {}",
        config.connections.len(),
        config.document_managers.len(),
        path.display()
    );
    Ok(config)
}
