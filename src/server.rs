//! HTTP surface of the translation proxy.
//!
//! # API Endpoints
//!
//! - `POST /api/translate` with `{ text, sourceLang, targetLang }`
//! - `OPTIONS /api/translate` preflight, answered by the CORS layer with no body
//! - `GET /api/languages` registry grouped by tier
//! - `GET /health`

use crate::error::ProxyError;
use crate::i18n::{LanguageEntry, LanguageRegistry, LanguageTier};
use crate::provider::API_KEY_HEADER;
use crate::proxy::{TranslationProxy, TranslationRequest, TranslationResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct LanguageGroup {
    pub tier: LanguageTier,
    pub label: &'static str,
    pub languages: Vec<LanguageEntry>,
}

pub fn router(proxy: TranslationProxy) -> Router {
    // Any OPTIONS request is treated as a preflight and answered here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(proxy)
}

async fn health_check() -> &'static str {
    "OK"
}

/// The body is parsed as JSON whatever its Content-Type.
async fn translate(
    State(proxy): State<TranslationProxy>,
    body: Bytes,
) -> Result<Json<TranslationResult>, ProxyError> {
    let request: TranslationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Unreadable translation request body: {}", e);
        ProxyError::InvalidInput
    })?;

    proxy.handle(request).await.map(Json)
}

async fn list_languages() -> Json<Vec<LanguageGroup>> {
    let registry = LanguageRegistry::get();
    let groups = LanguageTier::ALL
        .iter()
        .map(|tier| LanguageGroup {
            tier: *tier,
            label: tier.label(),
            languages: registry.list_tier(*tier).into_iter().cloned().collect(),
        })
        .collect();

    Json(groups)
}
