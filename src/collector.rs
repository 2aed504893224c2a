#[path = "collector/types.rs"]
mod types;

#[path = "collector/sentinel.rs"]
mod sentinel;

#[path = "collector/pacing.rs"]
mod pacing;

#[path = "collector/progress.rs"]
mod progress;

#[path = "collector/runner.rs"]
mod runner;

pub use pacing::Pacing;
pub use progress::{NoProgress, Progress};
pub use runner::BatchCollector;
pub use sentinel::ErrorSentinel;
pub use types::{Answer, AnswerSet, PromptRow};
