use anyhow::{Context, Result};
use llm_translator::{config::Config, proxy::TranslationProxy, server};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("llm_translator=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let missing = config.missing_provider_settings();
    if !missing.is_empty() {
        warn!(
            "Azure OpenAI configuration incomplete, translations will fail until set: {}",
            missing.join(", ")
        );
    }

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to create HTTP client")?;

    let addr = SocketAddr::new(config.host, config.port);
    let app = server::router(TranslationProxy::new(client, Arc::clone(&config)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Translation proxy listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
