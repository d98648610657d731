//! Completion client
//!
//! Wraps a [`Provider`] into the single two-message call the workflow needs.

use crate::error::ServiceError;
use crate::providers::{Message, Provider};

/// Reply used when the completion service cannot answer
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that request.";

/// One system prompt, one user message, one reply
pub struct CompletionClient {
    provider: Box<dyn Provider>,
}

impl CompletionClient {
    /// Create a client on top of a provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Send `system_prompt` and `user_text` to `model` and return the reply text
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure becomes a [`ServiceError`].
    /// Nothing is retried.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        model: &str,
    ) -> Result<String, ServiceError> {
        let messages = [Message::system(system_prompt), Message::user(user_text)];

        match self.provider.complete(&messages, model).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    tracing::debug!(
                        provider = self.provider.name(),
                        model,
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Completion finished"
                    );
                }
                Ok(response.message.content)
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), model, "Completion failed: {:#}", e);
                Err(ServiceError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{CompletionResponse, MockProvider};

    #[tokio::test]
    async fn test_complete_sends_system_then_user() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|messages, model| {
                messages.len() == 2
                    && messages[0] == Message::system("SYS")
                    && messages[1] == Message::user("Build a todo app")
                    && model == "m1"
            })
            .times(1)
            .returning(|_, _| Ok(CompletionResponse::new(Message::assistant("the plan"))));
        provider.expect_name().return_const("mock");

        let client = CompletionClient::new(Box::new(provider));
        let reply = client.complete("SYS", "Build a todo app", "m1").await;
        assert_eq!(reply, Ok("the plan".to_string()));
    }

    #[tokio::test]
    async fn test_complete_maps_failure_to_service_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));
        provider.expect_name().return_const("mock");

        let client = CompletionClient::new(Box::new(provider));
        let err = client.complete("SYS", "x", "m1").await.unwrap_err();
        assert!(err.message.contains("connection refused"));
    }
}
