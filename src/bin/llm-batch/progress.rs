use std::io::{self, Write};
use std::time::Duration;

use llm_batch::{
    collector::{AnswerSet, Progress, PromptRow},
    LLMError,
};

const ROW_PREVIEW_CHARS: usize = 50;
const ERROR_PREVIEW_CHARS: usize = 30;

/// Prints status lines to stdout while the batch runs.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn run_started(&self, rows: usize, attempts: usize) {
        println!(
            "Starting generation for {rows} prompts (Total {} API calls)...",
            rows * attempts
        );
    }

    fn row_started(&self, row: &PromptRow, total: usize) {
        print!(
            "[{}/{total}] Processing: {}...\r",
            row.index + 1,
            preview(&row.prompt, ROW_PREVIEW_CHARS)
        );
        let _ = io::stdout().flush();
    }

    fn attempt_failed(&self, row: &PromptRow, attempt: usize, err: &LLMError) {
        let message = err.to_string();
        println!(
            "\n!!! API ERROR on prompt: {}... (attempt {attempt}) Error: {}",
            preview(&row.prompt, ERROR_PREVIEW_CHARS),
            message.lines().next().unwrap_or_default()
        );
    }

    fn row_finished(&self, row: &PromptRow, total: usize, answers: &AnswerSet) {
        let failed = answers.failed_count();
        let note = if failed > 0 {
            format!(" ({failed} failed)")
        } else {
            String::new()
        };
        println!(
            "[{}/{total}] Completed:   {:<width$}{note}",
            row.index + 1,
            preview(&row.prompt, ROW_PREVIEW_CHARS),
            width = ROW_PREVIEW_CHARS
        );
    }

    fn pausing(&self, delay: Duration) {
        println!(
            ">>> Waiting {} seconds to avoid API quota limit (429 error)...",
            delay.as_secs_f32()
        );
    }
}

/// First `max` characters of `text` on a single line.
fn preview(text: &str, max: usize) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(max)
        .collect()
}
