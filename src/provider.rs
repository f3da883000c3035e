use crate::config::ProviderSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Output ceiling per translation
pub const MAX_TOKENS: u32 = 300;

/// Low temperature keeps translations close to literal
pub const TEMPERATURE: f32 = 0.3;

/// Header carrying the provider credential
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<RequestMessage>,
    max_tokens: u32,
    temperature: f32,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Failed to send request to Azure OpenAI: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Azure OpenAI API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Azure OpenAI response: {0}")]
    InvalidPayload(String),
}

impl ProviderError {
    /// Diagnostic payload: the provider's error body when it is JSON, otherwise text.
    pub fn details(&self) -> Value {
        match self {
            ProviderError::Status { body, .. } => serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(body.clone())),
            other => Value::String(other.to_string()),
        }
    }
}

/// Build the single-turn instruction sent to the provider
pub fn build_translation_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text from {} to {}:\n\n\"{}\"\n\nOnly provide the translated text without any additional commentary or explanation.",
        source_lang, target_lang, text
    )
}

/// Translated text from a completion: the first choice's content, trimmed.
///
/// # Arguments
/// * `response` - Parsed chat completion body
///
/// # Returns
/// The trimmed content, or an empty string when the first choice has no
/// content. A completion without any choice is an `InvalidPayload` error.
pub fn extract_translation(response: &ChatResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| ProviderError::InvalidPayload("No choices in completion".to_string()))?;

    Ok(choice
        .message
        .content
        .as_deref()
        .map(|content| content.trim().to_string())
        .unwrap_or_default())
}

/// Ask the configured deployment to translate `text`.
pub async fn request_translation(
    client: &reqwest::Client,
    settings: &ProviderSettings<'_>,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Result<String, ProviderError> {
    let request = ChatRequest {
        messages: vec![RequestMessage {
            role: "user",
            content: build_translation_prompt(text, source_lang, target_lang),
        }],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        model: settings.deployment,
    };

    debug!(
        "Sending translation request to deployment {} ({} -> {})",
        settings.deployment, source_lang, target_lang
    );

    let response = client
        .post(settings.chat_completions_url())
        .header(API_KEY_HEADER, settings.api_key.expose())
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(ProviderError::Status { status, body });
    }

    let body = response.text().await?;
    let chat_response: ChatResponse =
        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidPayload(e.to_string()))?;

    extract_translation(&chat_response)
}

/// Replace every occurrence of `secret` inside string values of `value`.
pub fn redact(value: Value, secret: &str) -> Value {
    if secret.is_empty() {
        return value;
    }
    match value {
        Value::String(s) => Value::String(s.replace(secret, "[REDACTED]")),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| redact(v, secret)).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, redact(v, secret)))
                .collect(),
        ),
        other => other,
    }
}
