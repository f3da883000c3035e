//! Errors produced by the translation proxy and their HTTP representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Empty text or a missing language on the incoming request
    #[error("Missing required parameters")]
    InvalidInput,

    /// One or more provider settings are absent from the configuration
    #[error("Missing Azure OpenAI configuration: {}", .missing.join(", "))]
    MisconfiguredProvider { missing: Vec<&'static str> },

    /// Transport failure, non-2xx status or unreadable payload from the provider
    #[error("Translation failed: {details}")]
    ProviderCallFailed { details: Value },
}

/// JSON body returned for every error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput => StatusCode::BAD_REQUEST,
            ProxyError::MisconfiguredProvider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::ProviderCallFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Configuration gaps are reported without naming variables.
    pub fn body(&self) -> ErrorBody {
        match self {
            ProxyError::InvalidInput => ErrorBody {
                error: "Missing required parameters".to_string(),
                details: None,
            },
            ProxyError::MisconfiguredProvider { .. } => ErrorBody {
                error: "Missing Azure OpenAI configuration".to_string(),
                details: None,
            },
            ProxyError::ProviderCallFailed { details } => ErrorBody {
                error: "Translation failed".to_string(),
                details: Some(details.clone()),
            },
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
