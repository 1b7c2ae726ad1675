//! Message translation.

use std::collections::HashMap;

/// Translates user-facing strings.
pub trait Localizer {
    /// Returns the translation of `message`, or `message` itself when untranslated.
    fn t(&self, message: &str) -> String;
}

/// A translation table for one UI language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
    translations: HashMap<String, String>,
}

impl Locale {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            translations: HashMap::new(),
        }
    }

    /// Adds a translation, returning the updated locale for chaining.
    pub fn with_translation(mut self, message: &str, translation: &str) -> Self {
        self.translations
            .insert(message.to_string(), translation.to_string());
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Localizer for Locale {
    fn t(&self, message: &str) -> String {
        self.translations
            .get(message)
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}
