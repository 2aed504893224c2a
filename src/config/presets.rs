use std::path::PathBuf;

use crate::builder::LLMBackend;

use super::types::{
    GenerationConfig, IoConfig, LoggingConfig, PacingConfig, ProviderConfig, RunConfig,
    SentinelConfig,
};

const DEFAULT_INPUT: &str = "AI_Ethics_Prompts.xlsx";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

impl RunConfig {
    /// Built-in defaults for a backend.
    pub fn preset(backend: LLMBackend) -> Self {
        match backend {
            LLMBackend::DeepSeek => deepseek(),
            LLMBackend::Google => google(),
        }
    }
}

fn deepseek() -> RunConfig {
    RunConfig {
        provider: provider(LLMBackend::DeepSeek, "deepseek-chat", "DEEPSEEK_API_KEY"),
        generation: GenerationConfig {
            temperature: 0.2,
            max_output_tokens: None,
            attempts: 20,
        },
        pacing: PacingConfig {
            call_delay_ms: 300,
            row_delay_ms: 0,
        },
        io: IoConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            answer_prefix: "Response_".to_string(),
        },
        sentinel: SentinelConfig {
            prefix: "API wrong: ".to_string(),
            max_detail_chars: 50,
        },
        logging: LoggingConfig::default(),
    }
}

fn google() -> RunConfig {
    RunConfig {
        provider: provider(LLMBackend::Google, "gemini-2.5-flash", "GEMINI_API_KEY"),
        generation: GenerationConfig {
            temperature: 0.8,
            max_output_tokens: Some(512),
            attempts: 5,
        },
        // Free-tier quotas are per minute; pause between prompts instead of calls.
        pacing: PacingConfig {
            call_delay_ms: 0,
            row_delay_ms: 15_000,
        },
        io: IoConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: Some(PathBuf::from("Gemini_API_Independent_Answers.csv")),
            answer_prefix: "Answer ".to_string(),
        },
        sentinel: SentinelConfig {
            prefix: "API_ERROR: ".to_string(),
            max_detail_chars: 80,
        },
        logging: LoggingConfig::default(),
    }
}

fn provider(backend: LLMBackend, model: &str, api_key_env: &str) -> ProviderConfig {
    ProviderConfig {
        backend,
        model: model.to_string(),
        base_url: None,
        api_key: None,
        api_key_env: api_key_env.to_string(),
        timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        system: None,
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
