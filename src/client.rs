use crate::controller::{RequestTicket, Submission, TranslationController};
use crate::proxy::{TranslationRequest, TranslationResult};
use tracing::{debug, warn};

pub const TRANSLATE_PATH: &str = "/api/translate";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to reach translation service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Translation service error ({status}): {body}")]
    Status { status: u16, body: String },
}

/// HTTP client for the translation proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, TRANSLATE_PATH))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit affordance was disabled; nothing happened
    Disabled,
    /// Validation failed before any request was sent
    Invalid,
    /// The outcome was applied to the form
    Applied,
    /// The outcome arrived for a superseded submission and was dropped
    Discarded,
}

/// A translation form: controller state plus the proxy it talks to.
///
/// `begin` is the submit button: it refuses while disabled, so a caller can
/// never have two submissions open from the same press sequence.
pub struct TranslatorSession {
    controller: TranslationController,
    client: ProxyClient,
}

impl TranslatorSession {
    pub fn new(controller: TranslationController, client: ProxyClient) -> Self {
        Self { controller, client }
    }

    pub fn controller(&self) -> &TranslationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TranslationController {
        &mut self.controller
    }

    /// Press submit. `Err` carries the outcome when no request was started.
    pub fn begin(&mut self) -> Result<Submission, SubmitOutcome> {
        if !self.controller.submit_enabled() {
            debug!("Submit ignored while disabled");
            return Err(SubmitOutcome::Disabled);
        }
        self.controller.submit().ok_or(SubmitOutcome::Invalid)
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<TranslationResult, ClientError>,
    ) -> SubmitOutcome {
        let applied = match outcome {
            Ok(result) => self.controller.on_response(ticket, result),
            Err(e) => {
                warn!("Translation request failed: {}", e);
                self.controller.on_failure(ticket, &e.to_string())
            }
        };

        if applied {
            SubmitOutcome::Applied
        } else {
            SubmitOutcome::Discarded
        }
    }

    /// Full submit cycle: press, send, apply.
    pub async fn translate(&mut self) -> SubmitOutcome {
        let submission = match self.begin() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let outcome = self.client.translate(&submission.request).await;
        self.complete(submission.ticket, outcome)
    }
}
