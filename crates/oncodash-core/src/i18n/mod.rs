//! English/French interface strings.
//!
//! Tables are flat JSON objects compiled into the binary and parsed on first
//! use. Every key exists in both tables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

static EN: Lazy<HashMap<String, String>> =
    Lazy::new(|| parse_table("en", include_str!("../../locales/en.json")));
static FR: Lazy<HashMap<String, String>> =
    Lazy::new(|| parse_table("fr", include_str!("../../locales/fr.json")));

fn parse_table(locale: &str, raw: &str) -> HashMap<String, String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!(locale, error = %e, "Translation table failed to parse");
        HashMap::new()
    })
}

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Parse a language tag; region subtags (`fr-CA`) are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let lang = raw.trim().split(['-', '_']).next()?;
        match lang.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// The other language (the header language switch).
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    fn table(self) -> &'static HashMap<String, String> {
        match self {
            Self::En => &EN,
            Self::Fr => &FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unsupported language {s:?} (expected en or fr)"))
    }
}

/// Looks up interface strings for one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn locale(self) -> Locale {
        self.locale
    }

    /// Switch to the other language, returning it.
    pub fn toggle(&mut self) -> Locale {
        self.locale = self.locale.toggle();
        self.locale
    }

    /// Localized string for `key`.
    ///
    /// # Panics
    ///
    /// In debug builds, when `key` is missing from the table. Release builds
    /// log a warning and return the key.
    pub fn t(self, key: &str) -> String {
        if let Some(text) = self.locale.table().get(key) {
            return text.clone();
        }
        if cfg!(debug_assertions) {
            panic!("missing translation key {key:?} for locale {}", self.locale);
        }
        warn!(key, locale = %self.locale, "Missing translation key");
        key.to_string()
    }

    /// Whether `key` exists for this locale.
    pub fn has(self, key: &str) -> bool {
        self.locale.table().contains_key(key)
    }

    /// Closure form of [`Translator::t`] for the report encoders.
    pub fn localizer(self) -> impl Fn(&str) -> String {
        move |key| self.t(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_tables_share_key_set() {
        let en: BTreeSet<_> = EN.keys().collect();
        let fr: BTreeSet<_> = FR.keys().collect();
        assert!(!en.is_empty());
        assert_eq!(en, fr);
    }

    #[test]
    fn test_lookup_per_locale() {
        let en = Translator::new(Locale::En);
        let fr = Translator::new(Locale::Fr);
        assert_eq!(en.t("reportTitle"), "Cancer Prediction Report");
        assert_eq!(fr.t("reportTitle"), "Rapport de Prédiction du Cancer");
        assert_eq!(fr.t("yes"), "Oui");
        assert_eq!(fr.t("highBP"), "Hypertension");
        assert_eq!(en.t("chance"), "Chance (%)");
    }

    #[test]
    fn test_domain_keys_are_present() {
        use crate::domain::{RiskLevel, ThemePreference};

        for locale in Locale::ALL {
            let t = Translator::new(locale);
            for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
                assert!(t.has(level.translation_key()));
            }
            for pref in ThemePreference::ALL {
                assert!(t.has(pref.translation_key()));
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing translation key")]
    fn test_missing_key_fails_loudly_in_debug() {
        let _ = Translator::new(Locale::En).t("noSuchKey");
    }

    #[test]
    fn test_toggle() {
        let mut t = Translator::default();
        assert_eq!(t.toggle(), Locale::Fr);
        assert_eq!(t.toggle(), Locale::En);
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(Locale::parse("fr-CA"), Some(Locale::Fr));
        assert_eq!(Locale::parse(" EN "), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
        assert!("es".parse::<Locale>().is_err());
    }

    #[test]
    fn test_localizer_closure() {
        let localize = Translator::new(Locale::Fr).localizer();
        assert_eq!(localize("no"), "Non");
    }
}
