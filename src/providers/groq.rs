//! Groq provider implementation for Planforge
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint with bearer
//! authentication. Groq is the default service; the base URL is configurable.

use crate::config::GroqConfig;
use crate::error::{PlanforgeError, Result};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq chat-completions provider
///
/// # Examples
///
/// ```no_run
/// use planforge::config::GroqConfig;
/// use planforge::providers::{GroqProvider, Message, Provider};
///
/// # async fn example() -> planforge::error::Result<()> {
/// let provider = GroqProvider::new(GroqConfig::default(), 120)?;
/// let messages = vec![Message::system("You plan projects"), Message::user("Build a todo app")];
/// let completion = provider.complete(&messages, "llama-3.2-3b-preview").await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct GroqProvider {
    client: Client,
    api_base: String,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl GroqProvider {
    /// Create a provider, reading the API key from the configured variable
    ///
    /// # Errors
    ///
    /// Returns `PlanforgeError::MissingCredentials` if the variable is unset
    /// or empty, or a provider error if the HTTP client cannot be built
    pub fn new(config: GroqConfig, timeout_seconds: u64) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlanforgeError::MissingCredentials(format!(
                    "groq (set {} in the environment or .env)",
                    config.api_key_env
                ))
            })?;

        Self::with_api_key(config, api_key, timeout_seconds)
    }

    /// Create a provider with an explicit API key
    pub fn with_api_key(
        config: GroqConfig,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("planforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlanforgeError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Groq provider: api_base={}", config.api_base);

        Ok(Self {
            client,
            api_base: config.api_base,
            api_key: api_key.into(),
        })
    }

    /// Full URL of the chat-completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<CompletionResponse> {
        let url = self.endpoint();
        let request = ChatCompletionRequest {
            model,
            messages,
            stream: false,
        };

        tracing::debug!(
            "Sending Groq request: model={}, {} messages",
            model,
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Groq request failed: {}", e);
                PlanforgeError::Provider(format!("Groq request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned error {}: {}", status, error_text);
            return Err(PlanforgeError::Provider(format!(
                "Groq returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Groq response: {}", e);
            PlanforgeError::Provider(format!("Failed to parse Groq response: {}", e))
        })?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            PlanforgeError::Provider("Groq response contained no choices".to_string())
        })?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        Ok(match body.usage {
            Some(usage) => CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            ),
            None => CompletionResponse::new(message),
        })
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}
