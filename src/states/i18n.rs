//! Internationalization Helpers
//!
//! Provides convenient functions for translating strings based on the
//! current language.

use super::LanguageContext;
use crate::constants::{NS_CATEGORIES, NS_COMMON, NS_HOMEPAGE};
use crate::i18n::Params;

/// Get translated string from "common" namespace
pub fn i18n_common(ctx: &LanguageContext, key: &str) -> String {
    ctx.t(NS_COMMON, key)
}

/// Get translated string from "homepage" namespace
pub fn i18n_homepage(ctx: &LanguageContext, key: &str) -> String {
    ctx.t(NS_HOMEPAGE, key)
}

/// Get translated string from "categories" namespace
pub fn i18n_categories(ctx: &LanguageContext, key: &str) -> String {
    ctx.t(NS_CATEGORIES, key)
}

/// Format a translated string with arguments
///
/// # Example
/// ```ignore
/// // With translation stats.subagents = "{{count}} Subagents"
/// i18n_format(&ctx, "common", "stats.subagents", &[("count", "43")])
/// // Returns "43 Subagents"
/// ```
pub fn i18n_format(ctx: &LanguageContext, namespace: &str, key: &str, args: &[(&str, &str)]) -> String {
    let params = args
        .iter()
        .fold(Params::new(), |params, (name, value)| params.with(*name, value));
    ctx.translate(namespace, key, Some(&params))
}
