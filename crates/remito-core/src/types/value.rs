//! Configuration values.
//!
//! A top-level entry in a configuration file is either a bare `key=value`
//! scalar or a `[section]` holding its own flat key/value pairs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat key/value pairs of a `[section]`
pub type Section = BTreeMap<String, String>;

/// A single top-level configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Bare value outside any section
    Scalar(String),
    /// Named group of key/value pairs
    Section(Section),
}

impl ConfigValue {
    /// Create a scalar value
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Create a section from key/value pairs
    pub fn section<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Section(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an empty section
    pub fn empty_section() -> Self {
        Self::Section(Section::new())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(value) => Some(value),
            ConfigValue::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ConfigValue::Section(section) => Some(section),
            ConfigValue::Scalar(_) => None,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, ConfigValue::Section(_))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Scalar(value) => write!(f, "{}", value),
            ConfigValue::Section(section) => {
                let mut first = true;
                for (key, value) in section {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{}={}", key, value)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Section> for ConfigValue {
    fn from(section: Section) -> Self {
        Self::Section(section)
    }
}
