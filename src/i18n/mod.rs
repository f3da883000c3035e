//! Supported languages for the translation form.
//!
//! - `registry`: the fixed code/name table, grouped into popular and other tiers
//! - `language`: a code validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Language, LanguageRegistry};
//!
//! let name = LanguageRegistry::get().lookup("es"); // Some("Spanish")
//! let spanish = Language::from_code("es")?;
//! ```

mod language;
mod registry;

pub use language::{Language, UnknownLanguage};
pub use registry::{LanguageEntry, LanguageRegistry, LanguageTier};
