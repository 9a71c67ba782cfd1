//! State Management Layer
//!
//! The language context owns the active language; everything else reads it.
//! Follows a unidirectional data flow pattern:
//!
//! ```text
//! User Action → set_language → PreferenceStore::save → LanguageEvent → consumers re-translate
//! ```

mod config;
mod i18n;
mod language;

pub use config::*;
pub use i18n::*;
pub use language::*;
