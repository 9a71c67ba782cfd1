//! i18n - Internationalization Module
//!
//! Locale bundles, key resolution with default-language fallback, and
//! `{{name}}` interpolation.

mod interpolate;
mod language;
mod loader;
mod resolve;
mod store;

pub use interpolate::{Params, interpolate};
pub use language::Language;
pub use loader::{BundleLoader, DirLoader, EmbeddedLoader};
pub use resolve::{Resolver, lookup};
pub use store::{LocaleStore, LocaleStoreBuilder, parse_bundle};
