//! End-to-end batch run: read prompts, collect answers, write the table.

use std::path::PathBuf;

use crate::{
    builder::LLMBuilder,
    chat::ChatProvider,
    collector::{BatchCollector, Progress},
    config::RunConfig,
    error::LLMError,
    table::{self, OutputFormat, TableError, PROMPT_COLUMN},
};

/// Setup failures that abort a run before any output is written.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("failed to initialise the LLM client: {0}")]
    Client(#[from] LLMError),
    #[error("no prompts found in '{}'", .0.display())]
    EmptyInput(PathBuf),
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub rows: usize,
    pub attempts: usize,
    pub failed_attempts: usize,
    pub output: PathBuf,
}

/// Builds the provider described by the configuration.
///
/// Fails when no API key can be resolved or the HTTP client cannot be set up.
pub fn build_provider(config: &RunConfig) -> Result<Box<dyn ChatProvider>, LLMError> {
    let provider = &config.provider;
    let mut builder = LLMBuilder::new()
        .backend(provider.backend)
        .model(provider.model.clone())
        .temperature(config.generation.temperature)
        .timeout_seconds(provider.timeout_seconds);
    if let Some(key) = config.api_key() {
        builder = builder.api_key_secret(key);
    }
    if let Some(max_tokens) = config.generation.max_output_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    if let Some(base_url) = &provider.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(system) = &provider.system {
        builder = builder.system(system.clone());
    }
    builder.build()
}

/// Runs one batch with an already built provider.
///
/// Per-attempt failures end up as sentinels in the output; only setup
/// problems (unreadable input, missing column, no prompts, unwritable output)
/// are returned as errors. Nothing is written unless the whole run completes.
pub async fn run_batch(
    config: &RunConfig,
    provider: &dyn ChatProvider,
    progress: &dyn Progress,
) -> Result<BatchReport, BatchError> {
    let output = config.output_path();
    OutputFormat::from_path(&output)?;

    let input = &config.io.input;
    log::info!("Reading prompts from {}", input.display());
    let rows = table::read_prompts(input, PROMPT_COLUMN)?;
    if rows.is_empty() {
        return Err(BatchError::EmptyInput(input.clone()));
    }

    let attempts = config.generation.attempts;
    let collector = BatchCollector::new(provider, attempts)
        .pacing(config.pacing.pacing())
        .sentinel(config.sentinel.sentinel())
        .progress(progress);
    let sets = collector.run(&rows).await;

    table::write_answers(&output, &sets, attempts, &config.io.answer_prefix)?;
    let failed_attempts = sets.iter().map(|set| set.failed_count()).sum();
    log::info!(
        "Wrote {} rows to {} ({} failed attempts)",
        sets.len(),
        output.display(),
        failed_attempts
    );

    Ok(BatchReport {
        rows: sets.len(),
        attempts,
        failed_attempts,
        output,
    })
}
