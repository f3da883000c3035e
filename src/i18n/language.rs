//! Language type: a code that has been checked against the registry.

use crate::i18n::LanguageRegistry;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language code: '{0}'")]
pub struct UnknownLanguage(pub String);

/// A language code present in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    /// Create a Language from a registry code.
    ///
    /// # Arguments
    /// * `code` - Registry code such as "es" or "zh"
    ///
    /// # Returns
    /// The language, or `UnknownLanguage` when the code is not registered.
    /// Display names are not accepted.
    ///
    /// # Example
    /// ```ignore
    /// let spanish = Language::from_code("es")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, UnknownLanguage> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|entry| Language { code: entry.code })
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}
