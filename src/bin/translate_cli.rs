//! Interactive translator client - a terminal front end for the proxy
//!
//! Usage:
//!   cargo run --bin translate
//!
//! Type text to translate it. Commands:
//!   /from <code>     set the source language (registry code)
//!   /to <language>   set the target language
//!   /swap            swap languages, moving the translation into the input
//!   /languages       list supported languages
//!   /quit            exit
//!
//! Optional environment variables:
//! - TRANSLATOR_URL (defaults to http://127.0.0.1:3000)
//! - TRANSLATOR_TARGET_MODE (`free-text` or `constrained`, defaults to free-text)

use anyhow::{bail, Result};
use llm_translator::client::{ProxyClient, SubmitOutcome, TranslatorSession};
use llm_translator::controller::{
    ControllerOptions, RenderState, TargetLanguageInputMode, TranslationController,
};
use llm_translator::i18n::{LanguageRegistry, LanguageTier};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

fn target_mode_from_env() -> Result<TargetLanguageInputMode> {
    match std::env::var("TRANSLATOR_TARGET_MODE").as_deref() {
        Err(_) | Ok("free-text") => Ok(TargetLanguageInputMode::FreeText),
        Ok("constrained") => Ok(TargetLanguageInputMode::Constrained),
        Ok(other) => bail!(
            "Invalid TRANSLATOR_TARGET_MODE: {}. Expected free-text or constrained",
            other
        ),
    }
}

fn print_languages() {
    let registry = LanguageRegistry::get();
    for tier in LanguageTier::ALL {
        println!("{}:", tier.label());
        for lang in registry.list_tier(tier) {
            println!("  {:<4} {}", lang.code, lang.name);
        }
    }
}

fn render(session: &TranslatorSession) {
    let controller = session.controller();
    match controller.render_state() {
        RenderState::Idle => println!("Translation will appear here"),
        RenderState::Pending => println!("Translating..."),
        RenderState::Succeeded(text) => println!("{}", text),
        RenderState::Failed(message) => println!("! {}", message),
    }
}

fn print_prompt(session: &TranslatorSession) {
    let controller = session.controller();
    let target = if controller.target_lang().is_empty() {
        "?"
    } else {
        controller.target_display()
    };
    println!("[{} -> {}]", controller.source_display(), target);
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("llm_translator=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url =
        std::env::var("TRANSLATOR_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let options = ControllerOptions {
        target_input_mode: target_mode_from_env()?,
        require_target_language: true,
    };

    info!("Using translation service at {}", base_url);

    let mut session = TranslatorSession::new(
        TranslationController::new(options),
        ProxyClient::new(reqwest::Client::new(), &base_url),
    );

    print_prompt(&session);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();

        if let Some(code) = line.strip_prefix("/from ") {
            if let Err(e) = session.controller_mut().set_source_lang(code.trim()) {
                println!("! {}", e);
            }
        } else if let Some(target) = line.strip_prefix("/to ") {
            if let Err(e) = session.controller_mut().set_target_lang(target.trim()) {
                println!("! {}", e);
            }
        } else if line == "/swap" {
            session.controller_mut().swap();
            if !session.controller().text().is_empty() {
                println!("Input: {}", session.controller().text());
            }
        } else if line == "/languages" {
            print_languages();
        } else if line == "/quit" {
            break;
        } else {
            session.controller_mut().edit_text(line);
            if session.translate().await == SubmitOutcome::Disabled {
                println!("! Enter text and a target language first (/to <language>)");
            } else {
                render(&session);
            }
        }

        print_prompt(&session);
    }

    Ok(())
}
