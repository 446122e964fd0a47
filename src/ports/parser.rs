// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! decoding a configuration document (YAML, JSON, ...) into a [`RegistryConfig`].

use crate::domain::{RegistryConfig, Result};

/// A trait for parsing registry configuration documents.
///
/// Parsers must keep the order connections and document managers are declared
/// in, and must not collapse repeated aliases: both are checked by the builder.
///
/// # Examples
///
/// ```rust
/// use odmwire::domain::{ConnectionConfig, RegistryConfig, Result};
/// use odmwire::ports::ConfigParser;
///
/// struct SingleEndpoint;
///
/// impl ConfigParser for SingleEndpoint {
///     fn parse(&self, content: &str) -> Result<RegistryConfig> {
///         Ok(RegistryConfig::new()
///             .with_connection(ConnectionConfig::new("default", content.trim())))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["uri"]
///     }
/// }
///
/// let config = SingleEndpoint.parse("mongodb://localhost\n").unwrap();
/// assert_eq!(config.connections[0].endpoint, "mongodb://localhost");
/// ```
pub trait ConfigParser {
    /// Parses configuration content.
    ///
    /// # Returns
    ///
    /// * `Ok(RegistryConfig)` - The decoded configuration, not yet validated
    /// * `Err(ConfigError)` - The content is malformed
    fn parse(&self, content: &str) -> Result<RegistryConfig>;

    /// Returns the file extensions supported by this parser, without the dot.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionConfig;

    struct LineParser;

    impl ConfigParser for LineParser {
        fn parse(&self, content: &str) -> Result<RegistryConfig> {
            Ok(content
                .lines()
                .filter_map(|line| line.split_once('='))
                .fold(RegistryConfig::new(), |config, (alias, endpoint)| {
                    config.with_connection(ConnectionConfig::new(alias, endpoint))
                }))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["lines"]
        }
    }

    #[test]
    fn test_parser_keeps_declaration_order() {
        let config = LineParser.parse("b=E2\na=E1\n").unwrap();
        let aliases: Vec<&str> = config.connections.iter().map(|c| c.alias.as_str()).collect();
        assert_eq!(aliases, vec!["b", "a"]);
    }

    #[test]
    fn test_parser_supported_extensions() {
        assert_eq!(LineParser.supported_extensions(), &["lines"]);
    }

    #[test]
    fn test_parser_parse_empty_content() {
        let config = LineParser.parse("").unwrap();
        assert!(config.connections.is_empty());
    }
}
