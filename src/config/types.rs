use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::builder::LLMBackend;
use crate::collector::{ErrorSentinel, Pacing};

use super::error::ConfigError;

/// Everything one batch run needs. Built once at startup and never mutated
/// afterwards.
#[derive(Debug)]
pub struct RunConfig {
    pub provider: ProviderConfig,
    pub generation: GenerationConfig,
    pub pacing: PacingConfig,
    pub io: IoConfig,
    pub sentinel: SentinelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug)]
pub struct ProviderConfig {
    pub backend: LLMBackend,
    pub model: String,
    pub base_url: Option<String>,
    /// Inline key; takes precedence over `api_key_env`.
    pub api_key: Option<SecretString>,
    /// Environment variable holding the key.
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub system: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
    /// Independent calls per prompt.
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    pub call_delay_ms: u64,
    pub row_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoConfig {
    pub input: PathBuf,
    /// Derived from the input name when unset.
    pub output: Option<PathBuf>,
    /// Answer columns are named `{answer_prefix}{n}`.
    pub answer_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelConfig {
    pub prefix: String,
    pub max_detail_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; stderr when unset.
    pub path: Option<PathBuf>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl RunConfig {
    /// Where the answers are written.
    ///
    /// Without an explicit output, this is `{input_stem}_{attempts}_Answers.xlsx`
    /// next to the input file.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.io.output {
            return output.clone();
        }
        let stem = self
            .io
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("prompts");
        let name = format!("{stem}_{}_Answers.xlsx", self.generation.attempts);
        match self.io.input.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Resolves the API key from the inline value or the environment.
    pub fn api_key(&self) -> Option<SecretString> {
        if let Some(key) = &self.provider.api_key {
            return Some(key.clone());
        }
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::new)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.attempts == 0 {
            return Err(ConfigError::Invalid(
                "generation.attempts must be at least 1".to_string(),
            ));
        }
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid(format!(
                "generation.temperature must be between 0 and 2, got {temperature}"
            )));
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.model is empty".to_string()));
        }
        if self.io.answer_prefix.is_empty() {
            return Err(ConfigError::Invalid("io.answer_prefix is empty".to_string()));
        }
        if self.sentinel.prefix.is_empty() {
            return Err(ConfigError::Invalid("sentinel.prefix is empty".to_string()));
        }
        Ok(())
    }
}

impl PacingConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            Duration::from_millis(self.call_delay_ms),
            Duration::from_millis(self.row_delay_ms),
        )
    }
}

impl SentinelConfig {
    pub fn sentinel(&self) -> ErrorSentinel {
        ErrorSentinel::new(self.prefix.clone(), self.max_detail_chars)
    }
}
