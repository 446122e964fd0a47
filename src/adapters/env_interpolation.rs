// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable interpolation for configuration documents.
//!
//! Endpoints and credentials usually differ per deployment, so string values of
//! a decoded configuration may reference environment variables:
//!
//! - `${NAME}` is replaced by the value of `NAME`; a missing variable is an error.
//! - `${NAME:-fallback}` uses `fallback` when `NAME` is unset or empty.
//! - `$${` produces a literal `${`.
//!
//! Expansion runs after decoding, so comments are never expanded and a value can
//! not change the shape of the document. Aliases and mapping keys are taken as
//! written, as are references to them.

use crate::domain::{ConfigError, OptionValue, Options, RegistryConfig, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Maximum length of an interpolated value (1MB).
const MAX_ENV_VALUE_LEN: usize = 1048576;

/// Expands `${...}` references in configuration text.
///
/// # Examples
///
/// ```rust
/// use odmwire::adapters::EnvInterpolator;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("MONGODB_URL".to_string(), "mongodb://db:27017".to_string());
///
/// let env = EnvInterpolator::with_values(vars);
/// let text = env.interpolate("endpoint: ${MONGODB_URL}\ndb: ${DB_NAME:-app}").unwrap();
/// assert_eq!(text, "endpoint: mongodb://db:27017\ndb: app");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvInterpolator {
    /// Fixed values; `None` reads the process environment.
    values: Option<HashMap<String, String>>,
}

impl EnvInterpolator {
    /// Creates an interpolator reading the process environment.
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an interpolator over fixed values, ignoring the process environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.values {
            Some(values) => values.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }

    /// Expands every reference in `content`.
    pub fn interpolate(&self, content: &str) -> Result<String> {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find('$') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(after) = tail.strip_prefix("$${") {
                out.push_str("${");
                rest = after;
                continue;
            }

            let Some(body_and_rest) = tail.strip_prefix("${") else {
                out.push('$');
                rest = &tail[1..];
                continue;
            };

            let end = body_and_rest.find('}').ok_or_else(|| ConfigError::ParseError {
                message: "Unterminated environment reference \"${\"".to_string(),
                source: None,
            })?;
            let body = &body_and_rest[..end];
            out.push_str(&self.resolve(body)?);
            rest = &body_and_rest[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Expands references in the string values of a decoded configuration.
    pub fn interpolate_config(&self, config: &mut RegistryConfig) -> Result<()> {
        for connection in &mut config.connections {
            self.expand(&mut connection.endpoint)?;
            self.expand_opt(&mut connection.default_database)?;
            self.expand_options(&mut connection.options)?;
            self.expand_options(&mut connection.driver_options)?;
        }
        for dm in &mut config.document_managers {
            self.expand_opt(&mut dm.database)?;
            self.expand_options(&mut dm.database_options)?;
            self.expand_opt(&mut dm.proxy_namespace)?;
            if let Some(dir) = &mut dm.proxy_dir {
                self.expand_path(dir)?;
            }
        }
        for dir in config.bundles.values_mut() {
            self.expand_path(dir)?;
        }
        Ok(())
    }

    fn expand(&self, value: &mut String) -> Result<()> {
        if value.contains('$') {
            *value = self.interpolate(value)?;
        }
        Ok(())
    }

    fn expand_opt(&self, value: &mut Option<String>) -> Result<()> {
        match value {
            Some(value) => self.expand(value),
            None => Ok(()),
        }
    }

    fn expand_options(&self, options: &mut Options) -> Result<()> {
        options.values_mut().try_for_each(|value| self.expand_value(value))
    }

    fn expand_value(&self, value: &mut OptionValue) -> Result<()> {
        match value {
            OptionValue::String(text) => self.expand(text),
            OptionValue::List(items) => items.iter_mut().try_for_each(|item| self.expand_value(item)),
            OptionValue::Map(map) => self.expand_options(map),
            _ => Ok(()),
        }
    }

    fn expand_path(&self, path: &mut PathBuf) -> Result<()> {
        if let Some(text) = path.to_str().filter(|text| text.contains('$')) {
            *path = PathBuf::from(self.interpolate(text)?);
        }
        Ok(())
    }

    fn resolve(&self, body: &str) -> Result<String> {
        let (name, fallback) = match body.split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (body, None),
        };

        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::ParseError {
                message: format!("Invalid environment variable name \"{}\"", name),
                source: None,
            });
        }

        let value = match (self.lookup(name), fallback) {
            (Some(value), _) if !value.is_empty() => value,
            (_, Some(fallback)) => fallback.to_string(),
            (Some(value), None) => value,
            (None, None) => {
                return Err(ConfigError::ParseError {
                    message: format!("Environment variable \"{}\" is not set", name),
                    source: None,
                })
            }
        };

        if value.len() > MAX_ENV_VALUE_LEN {
            return Err(ConfigError::ParseError {
                message: format!(
                    "Environment variable \"{}\" exceeds {} bytes",
                    name, MAX_ENV_VALUE_LEN
                ),
                source: None,
            });
        }

        Ok(value)
    }
}
