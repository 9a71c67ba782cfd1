//! Site i18n Library
//!
//! Translation service for the CLI tool documentation site: locale bundles,
//! dotted-key resolution with English fallback, `{{name}}` interpolation,
//! and a persisted language preference owned by a single language context.

pub mod assets;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod states;
pub mod utils;

pub use error::{Error, Result};
pub use i18n::{Language, LocaleStore, Params, Resolver};
pub use states::{LanguageContext, LanguageEvent, LoadOutcome, Phase};
