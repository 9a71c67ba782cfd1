//! Supported languages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported languages. `En` is the single fallback language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Chinese (Simplified)
    Zh,
}

impl Language {
    /// Every supported language, default first
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The fallback language
    pub const DEFAULT: Language = Language::En;

    /// Language code used in bundle paths and persisted preferences
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Get display name
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Parse a language code, returning `None` outside the supported set
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Map an OS locale tag (`zh-CN`, `en_US.UTF-8`, ...) to a supported language
    pub fn from_locale_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::from_code(&primary)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| Error::UnsupportedLanguage {
            code: s.to_string(),
        })
    }
}
