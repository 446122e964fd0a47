// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the odmwire crate.
//!
//! Every failure the registry builder, the configuration loaders, and the code
//! generation flows can report is a variant of [`ConfigError`]. All errors use
//! `thiserror` for proper error handling and conversion.

use thiserror::Error;

/// The main error type for registry construction and code generation.
///
/// Build-time variants always name the offending alias and, where relevant, the
/// option field that failed. The enum is marked as `#[non_exhaustive]` to allow
/// for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use odmwire::domain::errors::ConfigError;
///
/// let error = ConfigError::DanglingConnectionReference {
///     document_manager: "dm1".to_string(),
///     connection: "missing".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Connection \"missing\" for document manager \"dm1\" is not configured"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A document manager references a connection alias that is not configured.
    #[error("Connection \"{connection}\" for document manager \"{document_manager}\" is not configured")]
    DanglingConnectionReference {
        /// Alias of the document manager holding the reference
        document_manager: String,
        /// The connection alias that could not be resolved
        connection: String,
    },

    /// `readPreference.mode` is missing or not one of the supported modes.
    #[error("Invalid read preference mode {} for \"{alias}\"", .mode.as_deref().map(|m| format!("\"{m}\"")).unwrap_or_else(|| "<missing>".to_string()))]
    InvalidReadPreferenceMode {
        /// The connection or document manager alias
        alias: String,
        /// The mode found in the configuration, if any
        mode: Option<String>,
    },

    /// An option value is outside its allowed domain.
    #[error("Invalid option \"{field}\" for \"{alias}\": {message}")]
    InvalidOption {
        /// The connection or document manager alias
        alias: String,
        /// The option path, e.g. `readPreference.options.maxStalenessSeconds`
        field: String,
        /// What is wrong with the value
        message: String,
    },

    /// A required option is absent.
    #[error("Missing required option \"{field}\" for \"{alias}\"")]
    MissingRequiredOption {
        /// The connection or document manager alias
        alias: String,
        /// The option path that is required
        field: String,
    },

    /// Two entries of the same kind share an alias.
    #[error("Duplicate {kind} alias \"{alias}\"")]
    DuplicateAlias {
        /// Either `connection` or `document manager`
        kind: String,
        /// The repeated alias
        alias: String,
    },

    /// The configuration declares no connection at all.
    #[error("At least one connection must be configured")]
    NoConnections,

    /// An explicit default names an alias that is not configured.
    #[error("Default {kind} \"{alias}\" is not configured")]
    UnknownDefault {
        /// Either `connection` or `document manager`
        kind: String,
        /// The alias given as default
        alias: String,
    },

    /// A registry lookup asked for a document manager that does not exist.
    #[error("Document manager \"{alias}\" does not exist")]
    UnknownDocumentManager {
        /// The requested alias
        alias: String,
    },

    /// A registry lookup asked for a connection that does not exist.
    #[error("Connection \"{alias}\" does not exist")]
    UnknownConnection {
        /// The requested alias
        alias: String,
    },

    /// The metadata factory has no mapping for the type.
    ///
    /// Code generation treats this as "not a document" and skips the type.
    #[error("No metadata found for type \"{type_name}\"")]
    NoMetadata {
        /// The fully qualified type name
        type_name: String,
    },

    /// A mapping holds a name that can't appear in generated Rust source.
    #[error("Invalid mapping for \"{type_name}\": {message}")]
    InvalidMapping {
        /// The fully qualified type name
        type_name: String,
        /// What is wrong with the mapping
        message: String,
    },

    /// Proxy generation was requested from a compiled proxy factory.
    #[error("Proxy generation is disabled for \"{type_name}\": the proxy factory loads compiled proxies")]
    ProxyGenerationDisabled {
        /// The fully qualified type name
        type_name: String,
    },

    /// A compiled proxy factory could not find the proxy source.
    #[error("Proxy for \"{type_name}\" has not been generated at {}", .path.display())]
    ProxyNotCompiled {
        /// The fully qualified type name
        type_name: String,
        /// Where the proxy was expected
        path: std::path::PathBuf,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a configuration watcher.
    #[error("Configuration watcher error: {message}")]
    WatcherError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration or writing generated code.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an `InvalidOption` error.
    pub fn invalid_option(
        alias: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidOption {
            alias: alias.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a `MissingRequiredOption` error.
    pub fn missing_option(alias: impl Into<String>, field: impl Into<String>) -> Self {
        ConfigError::MissingRequiredOption {
            alias: alias.into(),
            field: field.into(),
        }
    }

    /// Returns true when the error means "this type is not a mapped document".
    pub fn is_no_metadata(&self) -> bool {
        matches!(self, ConfigError::NoMetadata { .. })
    }
}

/// A specialized Result type for odmwire operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
