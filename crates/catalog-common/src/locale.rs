//! Supported storefront locales and bilingual text.
//!
//! The catalog carries exactly two locales. Hebrew renders right-to-left, so
//! consumers pick the text direction from the locale rather than the content.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    He,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::He];

    /// Locale used when a requested tag is absent or unsupported.
    pub const FALLBACK: Locale = Locale::En;

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::He => "he",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Locale::En => Direction::Ltr,
            Locale::He => Direction::Rtl,
        }
    }

    /// Parse a locale tag such as `he` or `en-US`. Only the primary subtag is
    /// considered.
    pub fn parse(tag: &str) -> Option<Locale> {
        let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "he" => Some(Locale::He),
            _ => None,
        }
    }

    /// Resolve a preferred tag to a supported locale, falling back to English.
    pub fn resolve(preferred: Option<&str>) -> Locale {
        preferred.and_then(Locale::parse).unwrap_or(Self::FALLBACK)
    }
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// The same content rendered in English and Hebrew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocalizedText {
    pub en: String,
    pub he: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, he: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            he: he.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::He => &self.he,
        }
    }
}
