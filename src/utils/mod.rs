//! Utilities
//!
//! Persistence helpers shared by the language context and the CLI.

pub mod preference_store;

pub use preference_store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
