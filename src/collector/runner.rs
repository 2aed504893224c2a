use crate::chat::ChatProvider;

use super::pacing::Pacing;
use super::progress::{NoProgress, Progress};
use super::sentinel::ErrorSentinel;
use super::types::{Answer, AnswerSet, PromptRow};

/// Sends every prompt to one provider a fixed number of times and gathers
/// the answers.
///
/// Calls are strictly sequential: rows in input order, attempts in index
/// order, one request in flight at a time. A failed attempt is recorded as a
/// sentinel and never stops the run.
pub struct BatchCollector<'a> {
    provider: &'a dyn ChatProvider,
    attempts: usize,
    pacing: Pacing,
    sentinel: ErrorSentinel,
    progress: &'a dyn Progress,
}

impl<'a> BatchCollector<'a> {
    /// Creates a collector issuing `attempts` calls per prompt.
    pub fn new(provider: &'a dyn ChatProvider, attempts: usize) -> Self {
        Self {
            provider,
            attempts,
            pacing: Pacing::none(),
            sentinel: ErrorSentinel::default(),
            progress: &NoProgress,
        }
    }

    /// Sets the delays applied between calls and rows.
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets how failed attempts are rendered.
    pub fn sentinel(mut self, sentinel: ErrorSentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Sets the observer notified as the run advances.
    pub fn progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Collects `attempts` answers for every row.
    ///
    /// The result has one `AnswerSet` per input row, in input order, each
    /// holding exactly `attempts` slots.
    pub async fn run(&self, rows: &[PromptRow]) -> Vec<AnswerSet> {
        let total = rows.len();
        self.progress.run_started(total, self.attempts);
        log::info!(
            "Collecting {} answers for {} prompts ({} calls)",
            self.attempts,
            total,
            total * self.attempts
        );

        let mut results = Vec::with_capacity(total);
        for (position, row) in rows.iter().enumerate() {
            self.progress.row_started(row, total);
            let answers = self.collect_row(row).await;
            self.progress.row_finished(row, total, &answers);
            results.push(answers);

            if position + 1 < total && !self.pacing.row_delay.is_zero() {
                self.progress.pausing(self.pacing.row_delay);
                self.pacing.after_row().await;
            }
        }
        results
    }

    async fn collect_row(&self, row: &PromptRow) -> AnswerSet {
        let mut answers = Vec::with_capacity(self.attempts);
        for attempt in 1..=self.attempts {
            let answer = match self.provider.generate(&row.prompt).await {
                Ok(text) => Answer::Text(text.trim().to_string()),
                Err(err) => {
                    log::warn!(
                        "Attempt {attempt} for row {} failed: {err}",
                        row.source_row
                    );
                    self.progress.attempt_failed(row, attempt, &err);
                    Answer::Failed(self.sentinel.render(&err))
                }
            };
            answers.push(answer);
            self.pacing.after_attempt().await;
        }
        AnswerSet {
            prompt: row.prompt.clone(),
            answers,
        }
    }
}

#[cfg(test)]
#[path = "runner/tests.rs"]
mod tests;
