//! # Locale Module
//!
//! Display languages and their static string table.
//!
//! Language selection is display-only: it changes the page title and
//! nothing else, and never affects any computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    En,
    Uz,
    Ru,
}

impl Language {
    /// Returns the two-letter language code.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Uz => "UZ",
            Language::Ru => "RU",
        }
    }

    /// Parses a language code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_uppercase().as_str() {
            "EN" => Some(Language::En),
            "UZ" => Some(Language::Uz),
            "RU" => Some(Language::Ru),
            _ => None,
        }
    }

    /// The localized page title.
    pub const fn page_title(&self) -> &'static str {
        match self {
            Language::En => "Billionaire Project",
            Language::Uz => "Milliarderlar loyihasi",
            Language::Ru => "Проект миллиардеров",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The storefront starts in Uzbek.
impl Default for Language {
    fn default() -> Self {
        Language::Uz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in [Language::En, Language::Uz, Language::Ru] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_titles_differ_per_language() {
        assert_eq!(Language::En.page_title(), "Billionaire Project");
        assert_ne!(Language::Uz.page_title(), Language::Ru.page_title());
    }
}
