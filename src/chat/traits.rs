use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// Trait for providers that support chat-style interactions.
///
/// The model, sampling parameters and credentials are fixed when the provider
/// is built, so a call only carries the conversation.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;

    /// Sends a single user prompt and returns the response text.
    ///
    /// A response that carries no text is reported as a format error.
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let messages = [ChatMessage::user().content(prompt).build()];
        let response = self.chat(&messages).await?;
        response
            .text()
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: "response contained no text".to_string(),
                raw_response: response.to_string(),
            })
    }
}

