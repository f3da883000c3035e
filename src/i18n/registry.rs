//! Language registry: the fixed table of languages offered for selection.
//!
//! The table is built once on first access through a `OnceLock` and exposes
//! lookups only; nothing can add, remove or edit an entry at runtime.

use serde::Serialize;
use std::sync::OnceLock;

/// Selection group a language is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTier {
    Popular,
    Other,
}

impl LanguageTier {
    /// Tiers in display order
    pub const ALL: [LanguageTier; 2] = [LanguageTier::Popular, LanguageTier::Other];

    /// Heading shown above the group in a selector
    pub fn label(&self) -> &'static str {
        match self {
            LanguageTier::Popular => "Popular Languages",
            LanguageTier::Other => "Other Languages",
        }
    }
}

/// A supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    /// Short language code (e.g., "en", "zh")
    pub code: &'static str,

    /// English display name (e.g., "English", "Chinese")
    pub name: &'static str,

    #[serde(skip)]
    pub tier: LanguageTier,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageEntry>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Display name for a code, or `None` when the code is not registered.
    pub fn lookup(&self, code: &str) -> Option<&'static str> {
        self.get_by_code(code).map(|lang| lang.name)
    }

    /// Get a language entry by its code.
    ///
    /// # Arguments
    /// * `code` - Registry code (e.g., "en", "zh"), matched exactly
    ///
    /// # Returns
    /// The entry, or `None` for unregistered codes and display names
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages, popular first, each tier in its declared order.
    pub fn list_all(&self) -> Vec<&LanguageEntry> {
        LanguageTier::ALL
            .iter()
            .flat_map(|tier| self.list_tier(*tier))
            .collect()
    }

    /// Languages listed under one selection group.
    ///
    /// # Arguments
    /// * `tier` - Group to list
    ///
    /// # Returns
    /// Entries of that tier in declared order
    pub fn list_tier(&self, tier: LanguageTier) -> Vec<&LanguageEntry> {
        self.languages
            .iter()
            .filter(|lang| lang.tier == tier)
            .collect()
    }

    /// Name to render for a code. Unregistered values are shown as given.
    pub fn display_name<'a>(&self, code: &'a str) -> &'a str {
        match self.lookup(code) {
            Some(name) => name,
            None => code,
        }
    }
}

fn default_languages() -> Vec<LanguageEntry> {
    use LanguageTier::{Other, Popular};

    [
        ("en", "English", Popular),
        ("es", "Spanish", Popular),
        ("fr", "French", Popular),
        ("de", "German", Popular),
        ("zh", "Chinese", Popular),
        ("ar", "Arabic", Popular),
        ("ru", "Russian", Popular),
        ("it", "Italian", Other),
        ("ja", "Japanese", Other),
        ("ko", "Korean", Other),
        ("pt", "Portuguese", Other),
        ("nl", "Dutch", Other),
        ("tr", "Turkish", Other),
        ("hi", "Hindi", Other),
        ("sv", "Swedish", Other),
    ]
    .into_iter()
    .map(|(code, name, tier)| LanguageEntry { code, name, tier })
    .collect()
}
