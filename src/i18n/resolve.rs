//! Key resolution
//!
//! Walks a dotted key through a nested bundle, falls back to the default
//! language, and interpolates parameters. Failure never escapes `resolve`:
//! callers get the raw key back.

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::KEY_SEPARATOR;
use crate::error::{Error, Result};
use crate::i18n::interpolate::{Params, interpolate};
use crate::i18n::{Language, LocaleStore};

/// Turns `(language, namespace, key, params)` into display text
pub trait Resolver {
    /// Resolve a key, returning the key itself when no translation exists
    fn resolve(
        &self,
        language: Language,
        namespace: &str,
        key: &str,
        params: Option<&Params>,
    ) -> String;
}

/// Follow `key` through `bundle`. Any segment that is missing, or that has to
/// be read out of something other than an object, fails the lookup.
pub fn lookup<'a>(bundle: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    key.split(KEY_SEPARATOR)
        .try_fold(bundle, |current, segment| current.as_object()?.get(segment))
}

fn lookup_in(store: &LocaleStore, language: Language, namespace: &str, key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(Error::EmptyKey {
            namespace: namespace.to_string(),
        });
    }

    let bundle = store.get_bundle(language, namespace)?;
    match lookup(bundle, key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(Error::NonStringLeaf {
            language: language.code().to_string(),
            namespace: namespace.to_string(),
            key: key.to_string(),
        }),
        None => Err(Error::MissingKey {
            language: language.code().to_string(),
            namespace: namespace.to_string(),
            key: key.to_string(),
        }),
    }
}

impl LocaleStore {
    /// Resolve a key, reporting why it failed.
    ///
    /// The error describes the requested language's failure when the default
    /// language fails too.
    pub fn try_resolve(
        &self,
        language: Language,
        namespace: &str,
        key: &str,
        params: Option<&Params>,
    ) -> Result<String> {
        let text = match lookup_in(self, language, namespace, key) {
            Ok(text) => text,
            Err(err) if !language.is_default() && !matches!(err, Error::EmptyKey { .. }) => {
                let text = lookup_in(self, Language::DEFAULT, namespace, key).map_err(|_| err)?;
                debug!(
                    language = %language,
                    namespace,
                    key,
                    "Translation missing, using default language"
                );
                text
            }
            Err(err) => return Err(err),
        };

        Ok(match params {
            Some(params) if !params.is_empty() => interpolate(&text, params),
            _ => text,
        })
    }
}

impl Resolver for LocaleStore {
    fn resolve(
        &self,
        language: Language,
        namespace: &str,
        key: &str,
        params: Option<&Params>,
    ) -> String {
        self.try_resolve(language, namespace, key, params)
            .unwrap_or_else(|e| {
                warn!(error = %e, language = %language, namespace, key, "Translation not found");
                key.to_string()
            })
    }
}
