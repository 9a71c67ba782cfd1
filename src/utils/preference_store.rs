//! PreferenceStore - Persisted Language Preference
//!
//! One durable slot (`language`) holding the chosen language code. Storage
//! failures are logged and swallowed: `load` yields `None`, `save` does
//! nothing, and the language context keeps working in memory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::constants::{PREFERENCE_FILE, PREFERENCE_KEY};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Language;

/// Durable storage for the user's language choice
pub trait PreferenceStore: Send + Sync {
    /// Previously stored language, or `None` if unset, invalid or unreadable
    fn load(&self) -> Option<Language>;

    /// Store the language; returns once the write has completed or failed
    fn save(&self, language: Language);
}

fn validate(raw: Option<String>) -> Option<Language> {
    let raw = raw?;
    let language = Language::from_code(raw.trim());
    if language.is_none() {
        warn!(value = %raw, "Ignoring unsupported stored language");
    }
    language
}

// ==================== File Store ====================

/// Preference slot kept in a TOML file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: Option<PathBuf>,
}

impl FilePreferenceStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store in the platform config directory; degrades to a no-op store
    /// when that directory cannot be created.
    pub fn in_config_dir() -> Self {
        match get_or_create_config_dir() {
            Ok(dir) => Self::new(dir.join(PREFERENCE_FILE)),
            Err(e) => {
                warn!(error = %e, "Preference storage unavailable, language will not persist");
                Self { path: None }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn require_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or_else(|| Error::StorageUnavailable {
            message: "no preference file location".to_string(),
        })
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(toml::Table::new());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Raw stored value
    pub fn try_read(&self) -> Result<Option<String>> {
        let table = Self::read_table(self.require_path()?)?;
        Ok(table
            .get(PREFERENCE_KEY)
            .and_then(toml::Value::as_str)
            .map(str::to_string))
    }

    /// Write the language, keeping any other keys already in the file
    pub fn try_write(&self, language: Language) -> Result<()> {
        let path = self.require_path()?;
        let mut table = Self::read_table(path).unwrap_or_else(|e| {
            warn!(error = %e, path = ?path, "Overwriting unreadable preference file");
            toml::Table::new()
        });
        table.insert(
            PREFERENCE_KEY.to_string(),
            toml::Value::String(language.code().to_string()),
        );

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(&table)?)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<Language> {
        match self.try_read() {
            Ok(raw) => validate(raw),
            Err(e) => {
                warn!(error = %e, "Failed to read language preference");
                None
            }
        }
    }

    fn save(&self, language: Language) {
        match self.try_write(language) {
            Ok(()) => info!(language = %language, path = ?self.path, "Language preference saved"),
            Err(e) => warn!(error = %e, language = %language, "Failed to save language preference"),
        }
    }
}

// ==================== Memory Store ====================

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    writes: usize,
}

/// In-memory preference slot. Clones share the slot, so a clone handed to a
/// fresh context behaves like storage surviving a reload.
#[derive(Debug, Clone)]
pub struct MemoryPreferenceStore {
    slot: Arc<Mutex<MemorySlot>>,
    available: bool,
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            slot: Arc::default(),
            available: true,
        }
    }

    /// Slot pre-filled with a raw (possibly invalid) value
    pub fn with_value(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().value = Some(raw.into());
        store
    }

    /// Storage that is disabled: loads see nothing, saves are dropped
    pub fn unavailable() -> Self {
        Self {
            slot: Arc::default(),
            available: false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw stored value
    pub fn raw(&self) -> Option<String> {
        self.lock().value.clone()
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.lock().writes
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<Language> {
        if !self.available {
            debug!("Preference storage unavailable");
            return None;
        }
        validate(self.raw())
    }

    fn save(&self, language: Language) {
        if !self.available {
            debug!(language = %language, "Preference storage unavailable, keeping language in memory");
            return;
        }
        let mut slot = self.lock();
        slot.value = Some(language.code().to_string());
        slot.writes += 1;
    }
}
