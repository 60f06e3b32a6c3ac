//! Defaults + customizations loading and section-aware merging

use camino::{Utf8Path, Utf8PathBuf};
use remito_core::error::RemitoError;
use remito_core::types::{ConfigMapping, ConfigValue};
use tracing::{debug, warn};

/// Default name of the shipped defaults file
pub const DEFAULTS_FILE: &str = "defaults.ini";

/// Default name of the per-site customizations file
pub const CUSTOM_FILE: &str = "custom.ini";

/// Default name of the directory holding both files
pub const CONFIG_DIR: &str = "config";

/// Main configuration loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directory holding the defaults and customizations files
    config_dir: Utf8PathBuf,
    defaults_file: String,
    custom_file: String,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Shipped defaults file
    Defaults(Utf8PathBuf),
    /// Per-site customizations file
    Custom(Utf8PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Utf8Path {
        match self {
            ConfigSource::Defaults(path) | ConfigSource::Custom(path) => path,
        }
    }
}

impl ConfigLoader {
    /// Create a loader reading `defaults.ini` and `custom.ini` from `config_dir`
    pub fn new(config_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            defaults_file: DEFAULTS_FILE.to_string(),
            custom_file: CUSTOM_FILE.to_string(),
        }
    }

    /// Override the file names looked up inside the config directory
    pub fn with_file_names(mut self, defaults: impl Into<String>, custom: impl Into<String>) -> Self {
        self.defaults_file = defaults.into();
        self.custom_file = custom.into();
        self
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn defaults_path(&self) -> Utf8PathBuf {
        self.config_dir.join(&self.defaults_file)
    }

    pub fn custom_path(&self) -> Utf8PathBuf {
        self.config_dir.join(&self.custom_file)
    }

    /// Load both files and merge customizations over defaults
    ///
    /// Never fails: a missing or unreadable file counts as empty.
    pub async fn load(&self) -> ConfigMapping {
        self.load_with_sources().await.0
    }

    /// Same as [`ConfigLoader::load`], also reporting which files were read
    pub async fn load_with_sources(&self) -> (ConfigMapping, Vec<ConfigSource>) {
        let mut sources = Vec::new();

        let defaults_path = self.defaults_path();
        let defaults = match load_optional(&defaults_path).await {
            Some(mapping) => {
                sources.push(ConfigSource::Defaults(defaults_path));
                mapping
            }
            None => ConfigMapping::new(),
        };

        let custom_path = self.custom_path();
        let custom = match load_optional(&custom_path).await {
            Some(mapping) => {
                sources.push(ConfigSource::Custom(custom_path));
                mapping
            }
            None => ConfigMapping::new(),
        };

        let merged = merge(&defaults, &custom);
        debug!(
            sections = merged.len(),
            sources = sources.len(),
            "loaded configuration from {}",
            self.config_dir
        );

        (merged, sources)
    }

    /// Find the config directory for `cwd` (walks up directory tree)
    ///
    /// The first ancestor whose `config/` holds either file wins; otherwise
    /// `cwd/config` is returned even though it does not exist.
    pub fn resolve_config_dir(cwd: &Utf8Path) -> Utf8PathBuf {
        let mut current = Some(cwd);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_DIR);
            if candidate.join(DEFAULTS_FILE).exists() || candidate.join(CUSTOM_FILE).exists() {
                return candidate;
            }
            current = dir.parent();
        }

        cwd.join(CONFIG_DIR)
    }
}

/// Read one optional INI file, logging instead of failing
async fn load_optional(path: &Utf8Path) -> Option<ConfigMapping> {
    match crate::ini::load_from_file(path).await {
        Ok(mapping) => {
            debug!(entries = mapping.len(), "read {}", path);
            Some(mapping)
        }
        Err(RemitoError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found, treating as empty", path);
            None
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file {}", path);
            None
        }
    }
}

/// Merge `overrides` over `base`, section by section
///
/// Keys only in `base` are copied unchanged. A key in both where both sides
/// are sections becomes the union of their pairs, `overrides` winning per
/// key. Any other key in `overrides` replaces the base entry entirely.
pub fn merge(base: &ConfigMapping, overrides: &ConfigMapping) -> ConfigMapping {
    let mut merged = base.clone();

    for (key, value) in overrides {
        let combined = match (base.get(key), value) {
            (Some(ConfigValue::Section(base_section)), ConfigValue::Section(override_section)) => {
                let mut section = base_section.clone();
                section.extend(
                    override_section
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone())),
                );
                ConfigValue::Section(section)
            }
            (_, value) => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }

    merged
}
