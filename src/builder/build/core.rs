use crate::{chat::ChatProvider, error::LLMError};

use super::super::llm_builder::LLMBuilder;
use super::super::state::BuilderState;
use super::{backends, helpers};

impl LLMBuilder {
    /// Builds the configured provider.
    ///
    /// Fails when no backend is set, the API key is missing, or the HTTP
    /// client cannot be initialised.
    pub fn build(self) -> Result<Box<dyn ChatProvider>, LLMError> {
        self.state.build()
    }
}

impl BuilderState {
    pub(super) fn build(mut self) -> Result<Box<dyn ChatProvider>, LLMError> {
        helpers::log_builder_state(&self);
        let backend = self
            .backend
            .take()
            .ok_or_else(|| LLMError::InvalidRequest("No backend specified".to_string()))?;

        backends::build_backend(&mut self, backend)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{LLMBackend, LLMBuilder};
    use crate::error::LLMError;

    #[test]
    fn build_without_backend_is_rejected() {
        let err = LLMBuilder::new().api_key("k").build().err().unwrap();
        assert!(matches!(err, LLMError::InvalidRequest(_)));
    }

    #[test]
    fn build_without_api_key_is_an_auth_error() {
        let err = LLMBuilder::new()
            .backend(LLMBackend::Google)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, LLMError::AuthError(_)));
        assert!(err.to_string().contains("Google"));
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let err = LLMBuilder::new()
            .backend(LLMBackend::DeepSeek)
            .api_key("   ")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[test]
    fn builds_each_backend_with_a_key() {
        for backend in [LLMBackend::DeepSeek, LLMBackend::Google] {
            let built = LLMBuilder::new()
                .backend(backend)
                .api_key("k")
                .model("m")
                .temperature(0.5)
                .max_tokens(64)
                .timeout_seconds(3)
                .build();
            assert!(built.is_ok(), "{backend} should build");
        }
    }
}
