//! Report template table and hierarchical template resolution.
//!
//! Template names are keyed by dot-joined segments, most specific first:
//! `remito.<codsoc>.<type>`, then `remito.<codsoc>`, then `remito`.

use crate::types::ConfigMapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the configuration section holding the template table
pub const REPORT_SECTION: &str = "report";

/// Root key of the template hierarchy
pub const TEMPLATE_PREFIX: &str = "remito";

/// Template used when the table cannot be obtained at all
pub const FALLBACK_TEMPLATE: &str = "ZREMITOAI";

/// Flat mapping from dot-joined key to template name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportTemplateTable {
    templates: BTreeMap<String, String>,
}

impl ReportTemplateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table containing only the root `remito` entry with the fallback template
    pub fn fallback() -> Self {
        [(TEMPLATE_PREFIX, FALLBACK_TEMPLATE)].into_iter().collect()
    }

    /// Build the table from the `report` section of a merged configuration
    ///
    /// A missing or scalar `report` entry yields an empty table.
    pub fn from_config(config: &ConfigMapping) -> Self {
        config
            .section(REPORT_SECTION)
            .map(|section| Self {
                templates: section.clone(),
            })
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys tried by [`resolve_template`], most specific first
    ///
    /// Empty strings count as not provided.
    pub fn candidate_keys(codsoc: Option<&str>, kind: Option<&str>) -> Vec<String> {
        let codsoc = codsoc.filter(|c| !c.is_empty());
        let kind = kind.filter(|t| !t.is_empty());

        let mut keys = Vec::with_capacity(3);
        if let Some(codsoc) = codsoc {
            if let Some(kind) = kind {
                keys.push(format!("{}.{}.{}", TEMPLATE_PREFIX, codsoc, kind));
            }
            keys.push(format!("{}.{}", TEMPLATE_PREFIX, codsoc));
        }
        keys.push(TEMPLATE_PREFIX.to_string());
        keys
    }

    /// Resolve the template for a company and document type
    pub fn resolve(&self, codsoc: Option<&str>, kind: Option<&str>) -> Option<&str> {
        resolve_template(self, codsoc, kind)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReportTemplateTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Resolve a template name through the `remito` key hierarchy
///
/// Returns the first candidate key holding a non-empty value. When none
/// does, the raw `remito` entry is returned as-is, so the result may be
/// `None` or an empty string; callers must handle both.
pub fn resolve_template<'a>(
    table: &'a ReportTemplateTable,
    codsoc: Option<&str>,
    kind: Option<&str>,
) -> Option<&'a str> {
    ReportTemplateTable::candidate_keys(codsoc, kind)
        .iter()
        .filter_map(|key| table.get(key))
        .find(|template| !template.is_empty())
        .or_else(|| table.get(TEMPLATE_PREFIX))
}
