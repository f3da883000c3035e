//! Interaction state for one translation form.
//!
//! The controller performs no I/O. `submit` hands back the request to send
//! together with a ticket; the caller reports the outcome through
//! `on_response` or `on_failure` with that ticket. Every submit and every swap
//! starts a new generation, and outcomes carrying an older ticket are dropped.

use crate::i18n::{Language, LanguageRegistry, UnknownLanguage};
use crate::proxy::{TranslationRequest, TranslationResult};
use tracing::debug;

pub const DEFAULT_SOURCE_LANG: &str = "en";

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter text to translate";
pub const MISSING_TARGET_MESSAGE: &str = "Please select a target language";
pub const FAILURE_MESSAGE: &str = "Failed to translate. Please try again.";

/// How the target language is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetLanguageInputMode {
    /// Must be a registry code
    Constrained,
    /// Any label, e.g. "Brazilian Portuguese"
    #[default]
    FreeText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub target_input_mode: TargetLanguageInputMode,
    pub require_target_language: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            target_input_mode: TargetLanguageInputMode::default(),
            require_target_language: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),
}

/// What the output pane shows. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

/// Identifies the submission an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: RequestTicket,
    pub request: TranslationRequest,
}

#[derive(Debug, Clone)]
pub struct TranslationController {
    options: ControllerOptions,
    text: String,
    source_lang: String,
    target_lang: String,
    render: RenderState,
    generation: u64,
}

impl Default for TranslationController {
    fn default() -> Self {
        Self::new(ControllerOptions::default())
    }
}

impl TranslationController {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            options,
            text: String::new(),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: String::new(),
            render: RenderState::Idle,
            generation: 0,
        }
    }

    // ==================== Accessors ====================

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn is_loading(&self) -> bool {
        self.render == RenderState::Pending
    }

    /// Current translation, empty unless the last submit succeeded.
    pub fn translation(&self) -> &str {
        match &self.render {
            RenderState::Succeeded(text) => text,
            _ => "",
        }
    }

    /// Current error message, empty unless the last submit failed.
    pub fn error(&self) -> &str {
        match &self.render {
            RenderState::Failed(message) => message,
            _ => "",
        }
    }

    pub fn source_display(&self) -> &str {
        LanguageRegistry::get().display_name(&self.source_lang)
    }

    pub fn target_display(&self) -> &str {
        LanguageRegistry::get().display_name(&self.target_lang)
    }

    /// Whether the submit affordance is enabled.
    pub fn submit_enabled(&self) -> bool {
        !self.is_loading()
            && !self.text.is_empty()
            && (!self.options.require_target_language || !self.target_lang.is_empty())
    }

    // ==================== Edits ====================

    /// Edits never clear the visible result or error.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Source is always picked from the registry.
    pub fn set_source_lang(&mut self, code: &str) -> Result<(), ControllerError> {
        let language = Language::from_code(code)?;
        self.source_lang = language.code().to_string();
        Ok(())
    }

    pub fn set_target_lang(&mut self, value: &str) -> Result<(), ControllerError> {
        self.target_lang = match self.options.target_input_mode {
            TargetLanguageInputMode::Constrained => Language::from_code(value)?.code().to_string(),
            TargetLanguageInputMode::FreeText => value.to_string(),
        };
        Ok(())
    }

    // ==================== Transitions ====================

    /// Validate and start a request.
    ///
    /// Text must be non-blank, and so must the target language when
    /// `require_target_language` is set. Any visible translation or error is
    /// replaced.
    ///
    /// # Returns
    /// * `Some(Submission)` - The request to send and the ticket its outcome
    ///   must be reported with. The form is Pending.
    /// * `None` - Validation failed and the form shows the reason.
    ///
    /// Does not guard against a request already in flight: a second submit
    /// supersedes the first, whose outcome will be dropped.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.text.trim().is_empty() {
            self.render = RenderState::Failed(EMPTY_TEXT_MESSAGE.to_string());
            return None;
        }
        if self.options.require_target_language && self.target_lang.trim().is_empty() {
            self.render = RenderState::Failed(MISSING_TARGET_MESSAGE.to_string());
            return None;
        }

        self.generation += 1;
        self.render = RenderState::Pending;

        Some(Submission {
            ticket: RequestTicket {
                generation: self.generation,
            },
            request: TranslationRequest::new(
                self.text.clone(),
                self.source_lang.clone(),
                self.target_lang.clone(),
            ),
        })
    }

    /// Apply a successful result.
    ///
    /// # Arguments
    /// * `ticket` - Ticket returned by the matching `submit`
    /// * `result` - Proxy response; only `translated_text` is shown
    ///
    /// # Returns
    /// `false` if the ticket is stale and the result was dropped
    pub fn on_response(&mut self, ticket: RequestTicket, result: TranslationResult) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.render = RenderState::Succeeded(result.translated_text);
        true
    }

    /// Apply a failure. The reason is logged; the form shows a generic message.
    pub fn on_failure(&mut self, ticket: RequestTicket, reason: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        debug!("Translation request failed: {}", reason);
        self.render = RenderState::Failed(FAILURE_MESSAGE.to_string());
        true
    }

    /// Exchange languages and move the translation into the input.
    ///
    /// A request in flight is abandoned: its outcome will carry a stale ticket.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        self.text = self.translation().to_string();
        self.generation += 1;

        // An error stays on screen until the next submit
        if matches!(self.render, RenderState::Pending | RenderState::Succeeded(_)) {
            self.render = RenderState::Idle;
        }
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            debug!(
                "Dropping outcome for generation {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        true
    }
}
