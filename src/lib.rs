//! LLM-backed text translation: an HTTP proxy in front of an Azure OpenAI
//! deployment, and the client-side form controller that talks to it.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod provider;
pub mod proxy;
pub mod server;
