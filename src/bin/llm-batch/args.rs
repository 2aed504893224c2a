use std::path::PathBuf;

use clap::Parser;
use llm_batch::{builder::LLMBackend, config::RunConfig};

#[derive(Parser, Debug)]
#[command(
    name = "llm-batch",
    about = "Send every prompt in a spreadsheet to an LLM several times and save the answers"
)]
pub struct CliArgs {
    /// Provider preset: deepseek or google
    #[arg(long, short = 'p', value_parser = parse_backend)]
    pub provider: Option<LLMBackend>,
    /// TOML file with overrides
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Input spreadsheet with a `Prompt` column
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
    /// Output file (.xlsx or .csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Answers to collect per prompt
    #[arg(long, short = 'n')]
    pub attempts: Option<usize>,
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_backend(raw: &str) -> Result<LLMBackend, String> {
    raw.parse().map_err(|err: llm_batch::LLMError| err.to_string())
}

impl CliArgs {
    /// Applies command-line values over the loaded configuration.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(input) = &self.input {
            config.io.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.io.output = Some(output.clone());
        }
        if let Some(attempts) = self.attempts {
            config.generation.attempts = attempts;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
