// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI error types and result alias.

use crate::domain::ConfigError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading the configuration or building the registry failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The `--dm` alias names no document manager
    #[error("Document manager \"{0}\" does not exist.")]
    UnknownDocumentManager(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_is_kept() {
        let err = CliError::from(ConfigError::NoConnections);
        assert_eq!(err.to_string(), ConfigError::NoConnections.to_string());
    }

    #[test]
    fn test_unknown_document_manager_message() {
        let err = CliError::UnknownDocumentManager("archive".to_string());
        assert_eq!(err.to_string(), "Document manager \"archive\" does not exist.");
    }
}
