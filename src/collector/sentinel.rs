use crate::error::LLMError;

pub const DEFAULT_PREFIX: &str = "API_ERROR: ";
pub const DEFAULT_MAX_DETAIL_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Renders the placeholder stored when an attempt fails.
///
/// The detail is the first line of the error message, cut to
/// `max_detail_chars` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSentinel {
    pub prefix: String,
    pub max_detail_chars: usize,
}

impl Default for ErrorSentinel {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            max_detail_chars: DEFAULT_MAX_DETAIL_CHARS,
        }
    }
}

impl ErrorSentinel {
    pub fn new(prefix: impl Into<String>, max_detail_chars: usize) -> Self {
        Self {
            prefix: prefix.into(),
            max_detail_chars,
        }
    }

    pub fn render(&self, err: &LLMError) -> String {
        self.render_message(&err.to_string())
    }

    pub fn render_message(&self, message: &str) -> String {
        let first_line = message.lines().next().unwrap_or_default().trim();
        let mut detail: String = first_line.chars().take(self.max_detail_chars).collect();
        if detail.len() < first_line.len() {
            detail.push_str(ELLIPSIS);
        }
        format!("{}{}", self.prefix, detail)
    }

    /// Whether a stored cell value was produced by this sentinel.
    pub fn matches(&self, value: &str) -> bool {
        value.starts_with(&self.prefix)
    }
}
