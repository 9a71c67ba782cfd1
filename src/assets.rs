//! Embedded locale bundles
//!
//! Uses rust-embed to bundle `locales/<lang>/<namespace>.json` at compile time.

use rust_embed::RustEmbed;

use crate::constants::BUNDLE_EXTENSION;
use crate::i18n::Language;

/// Embedded files from the locales directory
#[derive(RustEmbed)]
#[folder = "locales"]
pub struct LocaleAssets;

/// Split a bundle path (`en/common.json`) into its language code and namespace
pub fn split_bundle_path(path: &str) -> Option<(&str, &str)> {
    let (code, file) = path.split_once('/')?;
    let namespace = file
        .strip_suffix(BUNDLE_EXTENSION)?
        .strip_suffix('.')?;
    (!namespace.is_empty() && !namespace.contains('/')).then_some((code, namespace))
}

/// Path of an embedded bundle for a language/namespace pair
pub fn bundle_path(language: Language, namespace: &str) -> String {
    format!("{}/{namespace}.{BUNDLE_EXTENSION}", language.code())
}

/// Raw bytes of an embedded bundle, if present
pub fn embedded_bundle(language: Language, namespace: &str) -> Option<Vec<u8>> {
    LocaleAssets::get(&bundle_path(language, namespace)).map(|f| f.data.into_owned())
}
