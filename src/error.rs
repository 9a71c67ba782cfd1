//! Error types for site-i18n
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! None of these are fatal to a consumer: the resolver turns translation
//! failures into the raw key, and the preference store swallows storage
//! failures after logging them.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Namespace (or the whole language) is not registered in the locale store
    #[snafu(display("Namespace '{namespace}' not found for language '{language}'"))]
    MissingNamespace { language: String, namespace: String },

    /// Dotted path does not lead anywhere in the bundle
    #[snafu(display("Key '{key}' not found in {namespace}/{language}"))]
    MissingKey {
        language: String,
        namespace: String,
        key: String,
    },

    /// Dotted path ends on an object, array or non-string scalar
    #[snafu(display("Key '{key}' in {namespace}/{language} is not a string"))]
    NonStringLeaf {
        language: String,
        namespace: String,
        key: String,
    },

    /// Empty keys never resolve
    #[snafu(display("Empty translation key in namespace '{namespace}'"))]
    EmptyKey { namespace: String },

    /// Language code outside the supported set
    #[snafu(display("Unsupported language: {code}"))]
    UnsupportedLanguage { code: String },

    /// Preference storage could not be reached
    #[snafu(display("Preference storage unavailable: {message}"))]
    StorageUnavailable { message: String },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON deserialization error (locale bundles)
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
