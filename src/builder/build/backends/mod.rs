mod deepseek;
mod google;

use crate::{builder::LLMBackend, chat::ChatProvider, error::LLMError};

use crate::builder::state::BuilderState;

pub(super) fn build_backend(
    state: &mut BuilderState,
    backend: LLMBackend,
) -> Result<Box<dyn ChatProvider>, LLMError> {
    match backend {
        LLMBackend::DeepSeek => deepseek::build_deepseek(state),
        LLMBackend::Google => google::build_google(state),
    }
}
