//! Translation proxy: validates a request, forwards it to the provider and
//! normalizes the outcome.

use crate::config::Config;
use crate::error::ProxyError;
use crate::provider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Incoming request body. Fields are optional so that absence is reported as
/// `InvalidInput` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            source_lang: Some(source_lang.into()),
            target_lang: Some(target_lang.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Stateless handler. Cloning shares the HTTP client and configuration.
#[derive(Debug, Clone)]
pub struct TranslationProxy {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl TranslationProxy {
    pub fn new(client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    pub async fn handle(&self, request: TranslationRequest) -> Result<TranslationResult, ProxyError> {
        let (text, source_lang, target_lang) = validate(request)?;

        let settings = self.config.provider().map_err(|missing| {
            error!("Missing Azure OpenAI configuration: {}", missing.join(", "));
            ProxyError::MisconfiguredProvider { missing }
        })?;

        let translated_text =
            provider::request_translation(&self.client, &settings, &text, &source_lang, &target_lang)
                .await
                .map_err(|e| {
                    let details = provider::redact(e.details(), settings.api_key.expose());
                    error!("Translation failed ({} -> {}): {}", source_lang, target_lang, details);
                    ProxyError::ProviderCallFailed { details }
                })?;

        info!(
            "Translated {} chars {} -> {} ({} chars)",
            text.chars().count(),
            source_lang,
            target_lang,
            translated_text.chars().count()
        );

        Ok(TranslationResult {
            original_text: text,
            translated_text,
            source_lang,
            target_lang,
        })
    }
}

/// Every field must be present and non-blank. Text is forwarded untrimmed.
fn validate(request: TranslationRequest) -> Result<(String, String, String), ProxyError> {
    fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    match (
        present(request.text),
        present(request.source_lang),
        present(request.target_lang),
    ) {
        (Some(text), Some(source), Some(target)) => Ok((text, source, target)),
        _ => {
            warn!("Rejected translation request with missing parameters");
            Err(ProxyError::InvalidInput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;
    use proptest::prelude::*;
    use wiremock::{
        matchers::{header, method},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(endpoint: &str) -> Config {
        Config {
            endpoint: Some(endpoint.to_string()),
            api_key: Some(ApiKey::new("test-key")),
            deployment: Some("gpt-4o".to_string()),
            api_version: "2024-08-01-preview".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        }
    }

    fn create_openai_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}}
            ]
        })
    }

    fn proxy(config: Config) -> TranslationProxy {
        TranslationProxy::new(reqwest::Client::new(), Arc::new(config))
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_accepts_complete_request() {
        let (text, source, target) =
            validate(TranslationRequest::new(" Hello ", "en", "es")).expect("Should validate");
        assert_eq!(text, " Hello ");
        assert_eq!(source, "en");
        assert_eq!(target, "es");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(validate(TranslationRequest::default()).is_err());
        assert!(validate(TranslationRequest {
            text: Some("Hello".to_string()),
            source_lang: Some("en".to_string()),
            target_lang: None,
        })
        .is_err());
    }

    #[test]
    fn test_validate_accepts_identical_languages() {
        assert!(validate(TranslationRequest::new("Hello", "en", "en")).is_ok());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{"text": "Hello", "sourceLang": "en", "targetLang": "es"}"#;
        let request: TranslationRequest = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(request, TranslationRequest::new("Hello", "en", "es"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = TranslationResult {
            original_text: "Hello".to_string(),
            translated_text: "Hola".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
        };
        let json = serde_json::to_value(&result).expect("Should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "originalText": "Hello",
                "translatedText": "Hola",
                "sourceLang": "en",
                "targetLang": "es"
            })
        );
    }

    proptest! {
        #[test]
        fn prop_whitespace_text_is_invalid(text in "[ \t\n\r]{0,16}") {
            let result = validate(TranslationRequest::new(text, "en", "es"));
            prop_assert!(matches!(result, Err(ProxyError::InvalidInput)));
        }
    }

    // ==================== handle Tests ====================

    #[tokio::test]
    async fn test_handle_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("Hola")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = proxy(create_test_config(&mock_server.uri()))
            .handle(TranslationRequest::new("Hello", "en", "es"))
            .await
            .expect("Should succeed");

        assert_eq!(result.original_text, "Hello");
        assert_eq!(result.translated_text, "Hola");
        assert_eq!(result.source_lang, "en");
        assert_eq!(result.target_lang, "es");
    }

    #[tokio::test]
    async fn test_handle_invalid_input_makes_no_provider_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("Hola")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = proxy(create_test_config(&mock_server.uri()))
            .handle(TranslationRequest::new("   ", "en", "es"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::InvalidInput));
    }

    #[tokio::test]
    async fn test_handle_missing_credential() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut config = create_test_config(&mock_server.uri());
        config.api_key = None;

        let err = proxy(config)
            .handle(TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap_err();

        match err {
            ProxyError::MisconfiguredProvider { missing } => {
                assert_eq!(missing, vec!["AZURE_OPENAI_API_KEY"]);
            }
            other => panic!("Expected MisconfiguredProvider, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_invalid_input_checked_before_configuration() {
        let mut config = create_test_config("http://unused.test");
        config.endpoint = None;

        let err = proxy(config)
            .handle(TranslationRequest::new("", "en", "es"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::InvalidInput));
    }

    #[tokio::test]
    async fn test_handle_provider_error_is_redacted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"error": {"code": "401", "message": "Key test-key is invalid"}}"#,
            ))
            .mount(&mock_server)
            .await;

        let err = proxy(create_test_config(&mock_server.uri()))
            .handle(TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap_err();

        match err {
            ProxyError::ProviderCallFailed { details } => {
                assert_eq!(details["error"]["code"], "401");
                assert!(!details.to_string().contains("test-key"));
            }
            other => panic!("Expected ProviderCallFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_completion_without_choices_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let err = proxy(create_test_config(&mock_server.uri()))
            .handle(TranslationRequest::new("Hello", "en", "es"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::ProviderCallFailed { .. }));
    }

    #[tokio::test]
    async fn test_handle_null_content_is_empty_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&mock_server)
            .await;

        let result = proxy(create_test_config(&mock_server.uri()))
            .handle(TranslationRequest::new("Hello", "en", "es"))
            .await
            .expect("Null content should still succeed");

        assert_eq!(result.translated_text, "");
    }

    #[tokio::test]
    async fn test_handle_normalization_ignores_request_metadata() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("\n Ciao \n")))
            .mount(&mock_server)
            .await;

        let proxy = proxy(create_test_config(&mock_server.uri()));
        let first = proxy
            .handle(TranslationRequest::new("Hello", "en", "it"))
            .await
            .expect("Should succeed");
        let second = proxy
            .handle(TranslationRequest::new("Something else", "Klingon", "de"))
            .await
            .expect("Should succeed");

        assert_eq!(first.translated_text, "Ciao");
        assert_eq!(first.translated_text, second.translated_text);
    }
}
