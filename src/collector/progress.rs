use std::time::Duration;

use crate::error::LLMError;

use super::types::{AnswerSet, PromptRow};

/// Observer for run progress. Every method defaults to doing nothing.
pub trait Progress: Send + Sync {
    fn run_started(&self, _rows: usize, _attempts: usize) {}

    fn row_started(&self, _row: &PromptRow, _total: usize) {}

    fn attempt_failed(&self, _row: &PromptRow, _attempt: usize, _err: &LLMError) {}

    fn row_finished(&self, _row: &PromptRow, _total: usize, _answers: &AnswerSet) {}

    fn pausing(&self, _delay: Duration) {}
}

/// Progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}
