use anyhow::{Context, Result};
use std::fmt;
use std::net::IpAddr;

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

pub const DEFAULT_API_VERSION: &str = "2024-08-01-preview";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Provider credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(**redacted**)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Azure OpenAI (optional at load time, checked per request)
    pub endpoint: Option<String>,
    pub api_key: Option<ApiKey>,
    pub deployment: Option<String>,
    pub api_version: String,

    // HTTP server
    pub host: IpAddr,
    pub port: u16,
}

/// Fully resolved provider settings, available only when nothing is missing.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSettings<'a> {
    pub endpoint: &'a str,
    pub api_key: &'a ApiKey,
    pub deployment: &'a str,
    pub api_version: &'a str,
}

impl ProviderSettings<'_> {
    /// Chat completions URL for the configured deployment
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: non_empty_var(ENV_ENDPOINT).map(|v| v.trim_end_matches('/').to_string()),
            api_key: non_empty_var(ENV_API_KEY).map(ApiKey::new),
            deployment: non_empty_var(ENV_DEPLOYMENT),
            api_version: non_empty_var(ENV_API_VERSION)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),

            host: std::env::var("HOST")
                .unwrap_or_else(|_| DEFAULT_HOST.to_string())
                .parse()
                .context("HOST must be a valid IP address")?,
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }

    /// Names of the provider variables that are not set.
    pub fn missing_provider_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint.is_none() {
            missing.push(ENV_ENDPOINT);
        }
        if self.api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.deployment.is_none() {
            missing.push(ENV_DEPLOYMENT);
        }
        missing
    }

    /// Resolve the provider settings, or report which variables are missing.
    pub fn provider(&self) -> std::result::Result<ProviderSettings<'_>, Vec<&'static str>> {
        match (&self.endpoint, &self.api_key, &self.deployment) {
            (Some(endpoint), Some(api_key), Some(deployment)) => Ok(ProviderSettings {
                endpoint,
                api_key,
                deployment,
                api_version: &self.api_version,
            }),
            _ => Err(self.missing_provider_settings()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
