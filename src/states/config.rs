//! Configuration State
//!
//! Optional `site-i18n.toml` in the platform config directory. Every field has
//! a default, so a missing or empty file means "embedded bundles, preference
//! file next to the config".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::CONFIG_FILE;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use crate::i18n::LocaleStore;
use crate::utils::FilePreferenceStore;

/// Translation service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Load bundles from this directory instead of the embedded ones
    pub locales_dir: Option<PathBuf>,
    /// Override for the preference file location
    pub preference_file: Option<PathBuf>,
    /// Use the OS locale when no preference has been stored
    pub detect_system_locale: bool,
}

impl I18nConfig {
    /// Load from the platform config directory
    pub fn try_load() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(CONFIG_FILE);
        Self::from_path(&path)
    }

    /// Load from an explicit file; a missing or blank file yields defaults
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;
        Ok(config)
    }

    /// Build the locale store this config points at
    pub fn locale_store(&self) -> Result<LocaleStore> {
        match &self.locales_dir {
            Some(dir) => LocaleStore::from_dir(dir),
            None => LocaleStore::embedded(),
        }
    }

    /// Preference store this config points at
    pub fn preference_store(&self) -> FilePreferenceStore {
        match &self.preference_file {
            Some(path) => FilePreferenceStore::new(path),
            None => FilePreferenceStore::in_config_dir(),
        }
    }
}
