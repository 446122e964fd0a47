// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read concern, read preference, and write concern translation.
//!
//! Connection options and document manager database options may carry three keys
//! that are not passed to the driver verbatim: `readConcern`, `readPreference` and
//! `writeConcern`. They are extracted from the generic option mapping, validated,
//! and replaced by the typed values defined here. Every other key passes through
//! untouched.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::option_value::{OptionValue, Options};
use std::fmt;

/// Option key holding the read concern level.
pub const READ_CONCERN: &str = "readConcern";
/// Option key holding the read preference mapping.
pub const READ_PREFERENCE: &str = "readPreference";
/// Option key holding the write concern mapping.
pub const WRITE_CONCERN: &str = "writeConcern";

/// Lowest staleness the server accepts for a secondary read, in seconds.
pub const MIN_MAX_STALENESS_SECONDS: i64 = 90;
/// Lowest heartbeat frequency the driver accepts, in milliseconds.
pub const MIN_HEARTBEAT_FREQUENCY_MS: i64 = 500;

/// A leveled read concern, passed to the driver unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadConcern {
    /// The level, e.g. `local`, `majority`, `linearizable`.
    pub level: String,
}

/// Read preference modes understood by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ReadPreferenceMode {
    /// Read from the primary only.
    #[default]
    Primary,
    /// Read from the primary, fall back to a secondary.
    PrimaryPreferred,
    /// Read from a secondary only.
    Secondary,
    /// Read from a secondary, fall back to the primary.
    SecondaryPreferred,
    /// Read from the member with the lowest latency.
    Nearest,
}

impl ReadPreferenceMode {
    /// All modes, in the order the driver numbers them.
    pub const ALL: [ReadPreferenceMode; 5] = [
        ReadPreferenceMode::Primary,
        ReadPreferenceMode::PrimaryPreferred,
        ReadPreferenceMode::Secondary,
        ReadPreferenceMode::SecondaryPreferred,
        ReadPreferenceMode::Nearest,
    ];

    /// Looks a mode up by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// The configuration name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            ReadPreferenceMode::Primary => "primary",
            ReadPreferenceMode::PrimaryPreferred => "primaryPreferred",
            ReadPreferenceMode::Secondary => "secondary",
            ReadPreferenceMode::SecondaryPreferred => "secondaryPreferred",
            ReadPreferenceMode::Nearest => "nearest",
        }
    }

    /// The driver's numeric mode constant.
    pub fn driver_constant(self) -> u8 {
        match self {
            ReadPreferenceMode::Primary => 1,
            ReadPreferenceMode::PrimaryPreferred => 5,
            ReadPreferenceMode::Secondary => 2,
            ReadPreferenceMode::SecondaryPreferred => 6,
            ReadPreferenceMode::Nearest => 10,
        }
    }
}

impl fmt::Display for ReadPreferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A read preference: mode, tag sets, and staleness bound.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ReadPreference {
    /// The routing mode.
    pub mode: ReadPreferenceMode,
    /// Tag sets, kept exactly as configured.
    pub tag_sets: Vec<Options>,
    /// Maximum replication lag tolerated for secondary reads.
    pub max_staleness_seconds: Option<i64>,
}

/// How many acknowledgments a write waits for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Acknowledgment {
    /// A fixed number of members.
    Nodes(u32),
    /// A majority of voting members.
    Majority,
    /// A custom tag-based write concern.
    Tag(String),
}

impl fmt::Display for Acknowledgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acknowledgment::Nodes(n) => write!(f, "{}", n),
            Acknowledgment::Majority => f.write_str("majority"),
            Acknowledgment::Tag(tag) => f.write_str(tag),
        }
    }
}

/// A write concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteConcern {
    /// Acknowledgment requirement.
    pub w: Acknowledgment,
    /// Timeout in milliseconds, 0 meaning no timeout.
    pub w_timeout: i64,
    /// Whether writes must reach the journal.
    pub journal: bool,
}

/// Options after translation, ready to hand to the driver.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ResolvedOptions {
    /// Translated `readConcern`.
    pub read_concern: Option<ReadConcern>,
    /// Translated `readPreference`.
    pub read_preference: Option<ReadPreference>,
    /// Translated `writeConcern`.
    pub write_concern: Option<WriteConcern>,
    /// Every other key, in configuration order.
    pub passthrough: Options,
}

impl ResolvedOptions {
    /// Returns true when nothing was configured.
    pub fn is_empty(&self) -> bool {
        self.read_concern.is_none()
            && self.read_preference.is_none()
            && self.write_concern.is_none()
            && self.passthrough.is_empty()
    }

    /// Looks up a pass-through option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.passthrough.get(key)
    }
}

/// Translates a generic option mapping for the connection or document manager `alias`.
///
/// # Examples
///
/// ```
/// use odmwire::domain::concerns::{translate_options, ReadPreferenceMode};
/// use odmwire::domain::option_value::{OptionValue, Options};
///
/// let mut read_preference = Options::new();
/// read_preference.insert("mode".to_string(), OptionValue::from("nearest"));
///
/// let mut options = Options::new();
/// options.insert("appname".to_string(), OptionValue::from("blog"));
/// options.insert("readPreference".to_string(), OptionValue::Map(read_preference));
///
/// let resolved = translate_options("main", &options).unwrap();
/// assert_eq!(
///     resolved.read_preference.unwrap().mode,
///     ReadPreferenceMode::Nearest
/// );
/// assert_eq!(resolved.passthrough.len(), 1);
/// ```
pub fn translate_options(alias: &str, options: &Options) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions::default();

    for (key, value) in options {
        match key.as_str() {
            READ_CONCERN => resolved.read_concern = Some(read_concern(alias, value)?),
            READ_PREFERENCE => resolved.read_preference = Some(read_preference(alias, value)?),
            WRITE_CONCERN => resolved.write_concern = Some(write_concern(alias, value)?),
            _ => {
                check_floor(alias, key, value)?;
                resolved.passthrough.insert(key.clone(), value.clone());
            }
        }
    }

    Ok(resolved)
}

/// Translates a `readConcern` value.
pub fn read_concern(alias: &str, value: &OptionValue) -> Result<ReadConcern> {
    let level = value.as_str().ok_or_else(|| {
        ConfigError::invalid_option(
            alias,
            READ_CONCERN,
            format!("expected a string level, got {}", value.kind()),
        )
    })?;

    Ok(ReadConcern {
        level: level.to_string(),
    })
}

/// Translates a `readPreference` mapping.
pub fn read_preference(alias: &str, value: &OptionValue) -> Result<ReadPreference> {
    let config = value.as_map().ok_or_else(|| {
        ConfigError::invalid_option(
            alias,
            READ_PREFERENCE,
            format!("expected a mapping, got {}", value.kind()),
        )
    })?;

    let mode = match config.get("mode") {
        Some(OptionValue::String(name)) => ReadPreferenceMode::from_name(name).ok_or_else(|| {
            ConfigError::InvalidReadPreferenceMode {
                alias: alias.to_string(),
                mode: Some(name.clone()),
            }
        })?,
        Some(other) => {
            return Err(ConfigError::InvalidReadPreferenceMode {
                alias: alias.to_string(),
                mode: Some(other.to_string()),
            })
        }
        None => {
            return Err(ConfigError::InvalidReadPreferenceMode {
                alias: alias.to_string(),
                mode: None,
            })
        }
    };

    let tag_sets = match config.get("tagSets") {
        None | Some(OptionValue::Null) => Vec::new(),
        Some(OptionValue::List(items)) => items
            .iter()
            .map(|item| {
                item.as_map().cloned().ok_or_else(|| {
                    ConfigError::invalid_option(
                        alias,
                        "readPreference.tagSets",
                        format!("expected a list of mappings, found {}", item.kind()),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(ConfigError::invalid_option(
                alias,
                "readPreference.tagSets",
                format!("expected a list, got {}", other.kind()),
            ))
        }
    };

    let max_staleness_seconds = match config.get("options") {
        None | Some(OptionValue::Null) => None,
        Some(OptionValue::Map(options)) => match options.get("maxStalenessSeconds") {
            None => None,
            Some(value) => Some(at_least(
                alias,
                "readPreference.options.maxStalenessSeconds",
                value,
                MIN_MAX_STALENESS_SECONDS,
            )?),
        },
        Some(other) => {
            return Err(ConfigError::invalid_option(
                alias,
                "readPreference.options",
                format!("expected a mapping, got {}", other.kind()),
            ))
        }
    };

    Ok(ReadPreference {
        mode,
        tag_sets,
        max_staleness_seconds,
    })
}

/// Translates a `writeConcern` mapping.
pub fn write_concern(alias: &str, value: &OptionValue) -> Result<WriteConcern> {
    let config = value.as_map().ok_or_else(|| {
        ConfigError::invalid_option(
            alias,
            WRITE_CONCERN,
            format!("expected a mapping, got {}", value.kind()),
        )
    })?;

    let w = match config.get("w") {
        None | Some(OptionValue::Null) => {
            return Err(ConfigError::missing_option(alias, "writeConcern.w"))
        }
        Some(OptionValue::Int(n)) => u32::try_from(*n).map(Acknowledgment::Nodes).map_err(|_| {
            ConfigError::invalid_option(
                alias,
                "writeConcern.w",
                format!("expected a non-negative node count, got {}", n),
            )
        })?,
        Some(OptionValue::String(s)) if s == "majority" => Acknowledgment::Majority,
        Some(OptionValue::String(s)) => match s.parse::<u32>() {
            Ok(n) => Acknowledgment::Nodes(n),
            Err(_) => Acknowledgment::Tag(s.clone()),
        },
        Some(other) => {
            return Err(ConfigError::invalid_option(
                alias,
                "writeConcern.w",
                format!("expected a string or integer, got {}", other.kind()),
            ))
        }
    };

    let w_timeout = match config.get("wTimeout") {
        None | Some(OptionValue::Null) => 0,
        Some(value) => at_least(alias, "writeConcern.wTimeout", value, 0)?,
    };

    let journal = match config.get("journal") {
        None | Some(OptionValue::Null) => false,
        Some(OptionValue::Bool(b)) => *b,
        Some(other) => {
            return Err(ConfigError::invalid_option(
                alias,
                "writeConcern.journal",
                format!("expected a boolean, got {}", other.kind()),
            ))
        }
    };

    Ok(WriteConcern {
        w,
        w_timeout,
        journal,
    })
}

fn check_floor(alias: &str, key: &str, value: &OptionValue) -> Result<()> {
    match key {
        "maxStalenessSeconds" => {
            at_least(alias, key, value, MIN_MAX_STALENESS_SECONDS)?;
        }
        "heartbeatFrequencyMS" => {
            at_least(alias, key, value, MIN_HEARTBEAT_FREQUENCY_MS)?;
        }
        _ => {}
    }
    Ok(())
}

fn at_least(alias: &str, field: &str, value: &OptionValue, floor: i64) -> Result<i64> {
    let n = value.as_i64().ok_or_else(|| {
        ConfigError::invalid_option(
            alias,
            field,
            format!("expected an integer, got {}", value.kind()),
        )
    })?;

    if n < floor {
        return Err(ConfigError::invalid_option(
            alias,
            field,
            format!("must be at least {}, got {}", floor, n),
        ));
    }

    Ok(n)
}
