//! Provider module for Planforge
//!
//! This module contains the completion-service abstraction, its Groq and
//! Ollama implementations, and the [`CompletionClient`] used by the workflow.

pub mod base;
pub mod client;
pub mod groq;
pub mod ollama;

pub use base::{CompletionResponse, Message, Provider, TokenUsage};
pub use client::{CompletionClient, FALLBACK_REPLY};
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{PlanforgeError, Result};

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
/// (for Groq, a missing API key)
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "groq" => Ok(Box::new(GroqProvider::new(
            config.groq.clone(),
            config.timeout_seconds,
        )?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(
            config.ollama.clone(),
            config.timeout_seconds,
        )?)),
        other => Err(PlanforgeError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}

#[cfg(test)]
mockall::mock! {
    pub Provider {}

    #[async_trait::async_trait]
    impl Provider for Provider {
        async fn complete(&self, messages: &[Message], model: &str) -> Result<CompletionResponse>;
        fn name(&self) -> &'static str;
    }
}
