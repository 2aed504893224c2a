use serde::{Deserialize, Serialize};

/// Usage metadata for a chat response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(default, alias = "promptTokenCount")]
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    #[serde(default, alias = "candidatesTokenCount")]
    pub completion_tokens: u32,
    /// Total number of tokens used
    #[serde(default, alias = "totalTokenCount")]
    pub total_tokens: u32,
}
