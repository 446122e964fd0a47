// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alias newtype for naming connections and document managers.
//!
//! Connections and document managers are addressed by an alias taken from the
//! key they are declared under in the configuration document. `Alias` wraps that
//! key so aliases can't be mixed up with database names or endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for connection and document manager aliases.
///
/// # Examples
///
/// ```
/// use odmwire::domain::alias::Alias;
///
/// let alias = Alias::from("main");
/// let other = Alias::from("reporting".to_string());
///
/// assert_eq!(alias.as_str(), "main");
/// assert_ne!(alias, other);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Alias given to the document manager synthesised when none is configured.
    pub const DEFAULT: &'static str = "default";

    /// Creates a new `Alias` from a `String`.
    pub fn new(alias: String) -> Self {
        Alias(alias)
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `Alias` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Alias {
    fn from(s: String) -> Self {
        Alias(s)
    }
}

impl From<&str> for Alias {
    fn from(s: &str) -> Self {
        Alias(s.to_string())
    }
}

impl From<&Alias> for Alias {
    fn from(alias: &Alias) -> Self {
        alias.clone()
    }
}

impl From<Alias> for String {
    fn from(alias: Alias) -> Self {
        alias.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Alias {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Alias {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Alias {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
