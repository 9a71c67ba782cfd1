//! i18n Constants
//!
//! Centralized names shared by the store, the preference layer and the CLI.

/// Namespace holding shared UI strings (navigation, buttons, stats)
pub const NS_COMMON: &str = "common";

/// Namespace holding homepage copy
pub const NS_HOMEPAGE: &str = "homepage";

/// Namespace holding category display names
pub const NS_CATEGORIES: &str = "categories";

/// Namespaces every supported language ships
pub const NAMESPACES: [&str; 3] = [NS_COMMON, NS_HOMEPAGE, NS_CATEGORIES];

/// Key of the single preference slot
pub const PREFERENCE_KEY: &str = "language";

/// File name of the persisted preferences
pub const PREFERENCE_FILE: &str = "preferences.toml";

/// File name of the optional configuration
pub const CONFIG_FILE: &str = "site-i18n.toml";

/// Extension of locale bundle files
pub const BUNDLE_EXTENSION: &str = "json";

/// Key separator for nested lookups
pub const KEY_SEPARATOR: char = '.';
