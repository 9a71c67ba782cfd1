//! Bundle Loaders
//!
//! Async sources for lazily loaded bundles. The language context awaits these
//! while a language switch is in flight.

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::assets::embedded_bundle;
use crate::constants::BUNDLE_EXTENSION;
use crate::error::{Error, Result};
use crate::i18n::Language;
use crate::i18n::store::parse_bundle;

/// Source of locale bundles for one (language, namespace) pair at a time
pub trait BundleLoader {
    fn load(&self, language: Language, namespace: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// Serves the bundles compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLoader;

impl BundleLoader for EmbeddedLoader {
    async fn load(&self, language: Language, namespace: &str) -> Result<Value> {
        let bytes = embedded_bundle(language, namespace).ok_or_else(|| Error::MissingNamespace {
            language: language.code().to_string(),
            namespace: namespace.to_string(),
        })?;
        parse_bundle(&bytes)
    }
}

/// Reads `<root>/<lang>/<namespace>.json` from disk
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, language: Language, namespace: &str) -> PathBuf {
        self.root
            .join(language.code())
            .join(format!("{namespace}.{BUNDLE_EXTENSION}"))
    }
}

impl BundleLoader for DirLoader {
    async fn load(&self, language: Language, namespace: &str) -> Result<Value> {
        let path = self.path(language, namespace);
        debug!(path = ?path, "Loading locale bundle");
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MissingNamespace {
                    language: language.code().to_string(),
                    namespace: namespace.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        parse_bundle(&bytes)
    }
}
