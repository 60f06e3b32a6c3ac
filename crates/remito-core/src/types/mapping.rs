//! Top-level configuration mapping.

use super::value::{ConfigValue, Section};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Map from top-level name to scalar or section
///
/// Entry order carries no meaning; a sorted map keeps output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMapping {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Get a section by name, `None` if absent or scalar
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.entries.get(name).and_then(ConfigValue::as_section)
    }

    /// Get a scalar by name, `None` if absent or a section
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(ConfigValue::as_scalar)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Mutable access to a section, creating it (or replacing a scalar) as needed
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(ConfigValue::empty_section);
        if !entry.is_section() {
            *entry = ConfigValue::empty_section();
        }
        match entry {
            ConfigValue::Section(section) => section,
            ConfigValue::Scalar(_) => unreachable!("entry was just replaced with a section"),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for ConfigMapping {
    type Item = (String, ConfigValue);
    type IntoIter = btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigMapping {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_and_scalar_lookup() {
        let mapping: ConfigMapping = [
            ("env", ConfigValue::scalar("prod")),
            ("db", ConfigValue::section([("host", "db1")])),
        ]
        .into_iter()
        .collect();

        assert_eq!(mapping.scalar("env"), Some("prod"));
        assert!(mapping.section("env").is_none());
        assert_eq!(mapping.section("db").unwrap().get("host").unwrap(), "db1");
        assert!(mapping.scalar("db").is_none());
        assert!(mapping.get("missing").is_none());
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_section_mut_replaces_scalar() {
        let mut mapping = ConfigMapping::new();
        mapping.insert("db", "sqlite");

        mapping.section_mut("db").insert("host".to_string(), "localhost".to_string());

        assert_eq!(mapping.section("db").unwrap().len(), 1);
        assert!(mapping.scalar("db").is_none());
    }

    #[test]
    fn test_json_round_shape() {
        let mut mapping = ConfigMapping::new();
        mapping.insert("env", "prod");
        mapping.section_mut("db").insert("user".to_string(), "app".to_string());

        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "db": { "user": "app" }, "env": "prod" })
        );
    }
}
