//! Google Gemini API client implementation for chat functionality.
//!
//! Uses the `generateContent` endpoint of the Generative Language API with
//! key-based authentication.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, Usage},
    error::LLMError,
};

/// Default API root; `models/{model}:generateContent` is appended to it.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Google client.
#[derive(Debug)]
pub struct GoogleConfig {
    /// API key for authentication with Google.
    pub api_key: String,
    /// API root without a trailing slash.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// System instruction to guide model behavior.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for interacting with Google's Gemini API.
#[derive(Debug, Clone)]
pub struct Google {
    pub config: Arc<GoogleConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct GooglePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GoogleContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GooglePart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerateRequest<'a> {
    contents: Vec<GoogleContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GoogleContent<'a>>,
    generation_config: GoogleGenerationConfig,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerateResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    #[serde(default)]
    usage_metadata: Option<Usage>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GoogleCandidate {
    #[serde(default)]
    content: Option<GoogleResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GoogleResponseContent {
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

#[derive(Deserialize, Debug)]
struct GoogleResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl std::fmt::Display for GoogleGenerateResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ChatResponse for GoogleGenerateResponse {
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            log::debug!(
                "Google candidate without text, finish reason {:?}",
                candidate.finish_reason
            );
            None
        } else {
            Some(text)
        }
    }

    fn usage(&self) -> Option<Usage> {
        self.usage_metadata.clone()
    }
}

impl Google {
    /// Creates a new Google client, failing if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            config: Arc::new(GoogleConfig {
                api_key: api_key.into(),
                base_url: base_url.trim_end_matches('/').to_string(),
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens,
                temperature,
                system,
                timeout_seconds,
            }),
            client: builder.build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

fn google_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

#[async_trait]
impl ChatProvider for Google {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.config.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing Google API key".to_string()));
        }

        let contents = messages
            .iter()
            .map(|m| GoogleContent {
                role: Some(google_role(m.role)),
                parts: vec![GooglePart { text: &m.content }],
            })
            .collect();

        let body = GoogleGenerateRequest {
            contents,
            system_instruction: self.config.system.as_deref().map(|system| GoogleContent {
                role: None,
                parts: vec![GooglePart { text: system }],
            }),
            generation_config: GoogleGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Google request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("Google HTTP status: {}", status);

        let text = resp.text().await?;
        if !status.is_success() {
            return Err(LLMError::from_status("Google", status, &text));
        }

        let json_resp: GoogleGenerateResponse =
            serde_json::from_str(&text).map_err(|err| LLMError::ResponseFormatError {
                message: format!("Failed to decode Google response: {err}"),
                raw_response: text.clone(),
            })?;

        Ok(Box::new(json_resp))
    }
}
