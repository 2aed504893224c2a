use serde::{Deserialize, Serialize};

use crate::error::LLMError;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMBackend {
    DeepSeek,
    #[serde(alias = "gemini")]
    Google,
}

impl LLMBackend {
    /// Lowercase identifier, as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            LLMBackend::DeepSeek => "deepseek",
            LLMBackend::Google => "google",
        }
    }
}

impl std::fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepseek" => Ok(LLMBackend::DeepSeek),
            "google" | "gemini" => Ok(LLMBackend::Google),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unknown LLM backend: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("deepseek", LLMBackend::DeepSeek)]
    #[case("DeepSeek", LLMBackend::DeepSeek)]
    #[case("google", LLMBackend::Google)]
    #[case("gemini", LLMBackend::Google)]
    fn parses_known_backends(#[case] raw: &str, #[case] expected: LLMBackend) {
        assert_eq!(raw.parse::<LLMBackend>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = "openai".parse::<LLMBackend>().unwrap_err();
        assert!(err.to_string().contains("Unknown LLM backend: openai"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for backend in [LLMBackend::DeepSeek, LLMBackend::Google] {
            assert_eq!(backend.to_string().parse::<LLMBackend>().unwrap(), backend);
        }
    }
}
