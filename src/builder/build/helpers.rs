use secrecy::ExposeSecret;

use crate::error::LLMError;

use super::super::state::BuilderState;

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

pub(super) fn log_builder_state(state: &BuilderState) {
    log::debug!(
        "Building LLM provider. backend={:?} model={:?} temp={:?} max_tokens={:?} base_url={:?}",
        state.backend,
        state.model,
        state.temperature,
        state.max_tokens,
        state.base_url,
    );
}

pub(super) fn require_api_key(
    state: &mut BuilderState,
    provider: &str,
) -> Result<String, LLMError> {
    let key = state
        .api_key
        .take()
        .map(|key| key.expose_secret().trim().to_string())
        .filter(|key| !key.is_empty());
    key.ok_or_else(|| LLMError::AuthError(format!("No API key provided for {provider}")))
}

pub(super) fn timeout_or_default(state: &BuilderState) -> Option<u64> {
    Some(state.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
}
