/// One input record: the prompt text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRow {
    /// Zero-based position among the data rows.
    pub index: usize,
    /// One-based row number in the source sheet, header included.
    pub source_row: usize,
    /// Prompt text, already stringified from the source cell.
    pub prompt: String,
}

impl PromptRow {
    pub fn new(index: usize, source_row: usize, prompt: impl Into<String>) -> Self {
        Self {
            index,
            source_row,
            prompt: prompt.into(),
        }
    }
}

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Trimmed text returned by the model.
    Text(String),
    /// Error sentinel stored in place of an answer.
    Failed(String),
}

impl Answer {
    /// The value written to the output cell.
    pub fn as_str(&self) -> &str {
        match self {
            Answer::Text(text) | Answer::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Answer::Failed(_))
    }
}

/// All answers collected for one prompt, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn failed_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_failed()).count()
    }

    /// Answer for a one-based attempt index.
    pub fn attempt(&self, attempt: usize) -> Option<&Answer> {
        attempt.checked_sub(1).and_then(|idx| self.answers.get(idx))
    }
}
