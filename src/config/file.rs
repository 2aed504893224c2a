use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use crate::builder::LLMBackend;

use super::types::RunConfig;

/// Optional overrides read from a TOML file and applied over a preset.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub provider: ProviderSection,
    pub generation: GenerationSection,
    pub pacing: PacingSection,
    pub io: IoSection,
    pub sentinel: SentinelSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    pub backend: Option<LLMBackend>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub system: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSection {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub attempts: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingSection {
    pub call_delay_ms: Option<u64>,
    pub row_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IoSection {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub answer_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentinelSection {
    pub prefix: Option<String>,
    pub max_detail_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub path: Option<PathBuf>,
    pub rotate_size: Option<u64>,
    pub rotate_keep: Option<usize>,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ConfigFile {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Builds a run configuration from the preset for `backend`, falling back
    /// to the file's backend and then DeepSeek.
    pub fn into_run_config(self, backend: Option<LLMBackend>) -> RunConfig {
        let backend = backend
            .or(self.provider.backend)
            .unwrap_or(LLMBackend::DeepSeek);
        let mut config = RunConfig::preset(backend);
        self.apply(&mut config);
        config
    }

    fn apply(self, config: &mut RunConfig) {
        let provider = &mut config.provider;
        set(&mut provider.model, self.provider.model);
        set(&mut provider.api_key_env, self.provider.api_key_env);
        set(&mut provider.timeout_seconds, self.provider.timeout_seconds);
        if self.provider.base_url.is_some() {
            provider.base_url = self.provider.base_url;
        }
        if self.provider.system.is_some() {
            provider.system = self.provider.system;
        }
        if let Some(key) = self.provider.api_key {
            provider.api_key = Some(SecretString::new(key));
        }

        let generation = &mut config.generation;
        set(&mut generation.temperature, self.generation.temperature);
        set(&mut generation.attempts, self.generation.attempts);
        if self.generation.max_output_tokens.is_some() {
            generation.max_output_tokens = self.generation.max_output_tokens;
        }

        set(&mut config.pacing.call_delay_ms, self.pacing.call_delay_ms);
        set(&mut config.pacing.row_delay_ms, self.pacing.row_delay_ms);

        set(&mut config.io.input, self.io.input);
        set(&mut config.io.answer_prefix, self.io.answer_prefix);
        if self.io.output.is_some() {
            config.io.output = self.io.output;
        }

        set(&mut config.sentinel.prefix, self.sentinel.prefix);
        set(
            &mut config.sentinel.max_detail_chars,
            self.sentinel.max_detail_chars,
        );

        let logging = &mut config.logging;
        set(&mut logging.level, self.logging.level);
        set(&mut logging.rotate_size, self.logging.rotate_size);
        set(&mut logging.rotate_keep, self.logging.rotate_keep);
        if self.logging.path.is_some() {
            logging.path = self.logging.path;
        }
    }
}
