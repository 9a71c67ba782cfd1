//! LocaleStore - Translation Bundles
//!
//! Holds one JSON bundle per (language, namespace). A store is immutable once
//! built; loading more bundles produces a new store.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::assets::{LocaleAssets, split_bundle_path};
use crate::constants::BUNDLE_EXTENSION;
use crate::error::{Error, Result};
use crate::i18n::Language;

type Namespaces = AHashMap<String, Value>;

/// Parse a bundle document, requiring an object at the root
pub fn parse_bundle(bytes: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        return Err(Error::Invalid {
            message: "Locale bundle root must be a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Immutable set of translation bundles
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    bundles: AHashMap<Language, Namespaces>,
}

impl LocaleStore {
    /// Store without any bundles
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> LocaleStoreBuilder {
        LocaleStoreBuilder::default()
    }

    /// Load every bundle compiled into the binary
    pub fn embedded() -> Result<Self> {
        let mut builder = Self::builder();

        for path in LocaleAssets::iter() {
            let Some((code, namespace)) = split_bundle_path(&path) else {
                debug!(path = %path, "Skipping non-bundle asset");
                continue;
            };
            let Some(language) = Language::from_code(code) else {
                warn!(path = %path, "Skipping bundle for unsupported language");
                continue;
            };
            let Some(file) = LocaleAssets::get(&path) else {
                continue;
            };
            let bundle = parse_bundle(&file.data).map_err(|e| {
                warn!(error = %e, path = %path, "Failed to parse embedded bundle");
                e
            })?;
            builder = builder.bundle(language, namespace, bundle);
        }

        let store = builder.build();
        info!(bundles = store.len(), "Loaded embedded locale bundles");
        Ok(store)
    }

    /// Load bundles from `<root>/<lang>/<namespace>.json`
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut builder = Self::builder();

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let dir_name = entry.file_name();
            let code = dir_name.to_string_lossy();
            let Some(language) = Language::from_code(&code) else {
                warn!(dir = ?entry.path(), "Skipping locale directory for unsupported language");
                continue;
            };

            for file in fs::read_dir(entry.path())? {
                let path = file?.path();
                if !path.is_file() || path.extension().is_none_or(|ext| ext != BUNDLE_EXTENSION) {
                    continue;
                }
                let Some(namespace) = path.file_stem().map(|s| s.to_string_lossy().to_string())
                else {
                    continue;
                };
                let bundle = parse_bundle(&fs::read(&path)?).map_err(|e| {
                    warn!(error = %e, path = ?path, "Failed to parse bundle");
                    e
                })?;
                builder = builder.bundle(language, namespace, bundle);
            }
        }

        let store = builder.build();
        info!(bundles = store.len(), root = ?root, "Loaded locale bundles from directory");
        Ok(store)
    }

    /// Get the bundle for a language/namespace pair
    pub fn get_bundle(&self, language: Language, namespace: &str) -> Result<&Value> {
        self.bundles
            .get(&language)
            .and_then(|namespaces| namespaces.get(namespace))
            .ok_or_else(|| Error::MissingNamespace {
                language: language.code().to_string(),
                namespace: namespace.to_string(),
            })
    }

    pub fn has_bundle(&self, language: Language, namespace: &str) -> bool {
        self.get_bundle(language, namespace).is_ok()
    }

    /// Whether every listed namespace is present for `language`
    pub fn has_all(&self, language: Language, namespaces: &[&str]) -> bool {
        namespaces.iter().all(|ns| self.has_bundle(language, ns))
    }

    /// Languages with at least one bundle
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<_> = self.bundles.keys().copied().collect();
        languages.sort();
        languages
    }

    /// Namespaces registered for a language, sorted
    pub fn namespaces(&self, language: Language) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self
            .bundles
            .get(&language)
            .map(|ns| ns.keys().map(String::as_str).collect())
            .unwrap_or_default();
        namespaces.sort_unstable();
        namespaces
    }

    /// Total number of bundles
    pub fn len(&self) -> usize {
        self.bundles.values().map(|namespaces| namespaces.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// New store containing these bundles plus `extra` (which wins on conflicts)
    pub fn with_bundles(
        &self,
        extra: impl IntoIterator<Item = (Language, String, Value)>,
    ) -> LocaleStore {
        let mut bundles = self.bundles.clone();
        for (language, namespace, bundle) in extra {
            bundles.entry(language).or_default().insert(namespace, bundle);
        }
        LocaleStore { bundles }
    }
}

/// Builder used to assemble a store before it is frozen
#[derive(Debug, Default)]
pub struct LocaleStoreBuilder {
    bundles: AHashMap<Language, Namespaces>,
}

impl LocaleStoreBuilder {
    pub fn bundle(mut self, language: Language, namespace: impl Into<String>, bundle: Value) -> Self {
        self.bundles
            .entry(language)
            .or_default()
            .insert(namespace.into(), bundle);
        self
    }

    /// Add a bundle from JSON text
    pub fn json(self, language: Language, namespace: impl Into<String>, json: &str) -> Result<Self> {
        let bundle = parse_bundle(json.as_bytes())?;
        Ok(self.bundle(language, namespace, bundle))
    }

    pub fn build(self) -> LocaleStore {
        LocaleStore {
            bundles: self.bundles,
        }
    }
}
