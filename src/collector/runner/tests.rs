use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::chat::{ChatMessage, ChatResponse};
use crate::error::LLMError;

#[derive(Debug)]
struct TextResponse(Option<String>);

impl std::fmt::Display for TextResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ChatResponse for TextResponse {
    fn text(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Answers `echo:{prompt}:{n}` where `n` counts calls per prompt.
#[derive(Default)]
struct EchoProvider {
    seen: Mutex<HashMap<String, usize>>,
}

#[async_trait]
impl ChatProvider for EchoProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let prompt = messages[0].content.clone();
        let mut seen = self.seen.lock().unwrap();
        let n = seen.entry(prompt.clone()).or_insert(0);
        *n += 1;
        Ok(Box::new(TextResponse(Some(format!("echo:{prompt}:{n}")))))
    }
}

/// Fails on the given one-based global call numbers, answers otherwise.
struct FailingCalls {
    calls: AtomicUsize,
    fail_on: HashSet<usize>,
}

impl FailingCalls {
    fn new(fail_on: impl IntoIterator<Item = usize>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: fail_on.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ChatProvider for FailingCalls {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&call) {
            return Err(LLMError::ProviderError(format!("quota exceeded on call {call}")));
        }
        Ok(Box::new(TextResponse(Some(format!(
            "{} #{call}",
            messages[0].content
        )))))
    }
}

struct AlwaysFails;

#[async_trait]
impl ChatProvider for AlwaysFails {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        Err(LLMError::HttpError("connection refused".to_string()))
    }
}

struct Fixed(Option<&'static str>);

#[async_trait]
impl ChatProvider for Fixed {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        Ok(Box::new(TextResponse(self.0.map(str::to_string))))
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Progress for Recorder {
    fn run_started(&self, rows: usize, attempts: usize) {
        self.push(format!("run {rows}x{attempts}"));
    }

    fn row_started(&self, row: &PromptRow, total: usize) {
        self.push(format!("start {}/{total}", row.index + 1));
    }

    fn attempt_failed(&self, row: &PromptRow, attempt: usize, _err: &LLMError) {
        self.push(format!("fail {}.{attempt}", row.index + 1));
    }

    fn row_finished(&self, row: &PromptRow, _total: usize, answers: &AnswerSet) {
        self.push(format!("done {} ({})", row.index + 1, answers.answers.len()));
    }

    fn pausing(&self, delay: Duration) {
        self.push(format!("pause {}ms", delay.as_millis()));
    }
}

fn rows(prompts: &[&str]) -> Vec<PromptRow> {
    prompts
        .iter()
        .enumerate()
        .map(|(i, p)| PromptRow::new(i, i + 2, *p))
        .collect()
}

#[tokio::test]
async fn echo_answers_fill_slots_in_attempt_order() {
    let provider = EchoProvider::default();
    let collector = BatchCollector::new(&provider, 3);

    let sets = collector.run(&rows(&["Hello"])).await;

    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].prompt, "Hello");
    let answers: Vec<&str> = sets[0].answers.iter().map(Answer::as_str).collect();
    assert_eq!(answers, ["echo:Hello:1", "echo:Hello:2", "echo:Hello:3"]);
}

#[tokio::test]
async fn every_row_gets_every_slot_when_all_calls_fail() {
    let collector = BatchCollector::new(&AlwaysFails, 4);

    let sets = collector.run(&rows(&["a", "b", "c"])).await;

    assert_eq!(sets.len(), 3);
    for set in &sets {
        assert_eq!(set.answers.len(), 4);
        assert_eq!(set.failed_count(), 4);
        for answer in &set.answers {
            assert_eq!(
                answer.as_str(),
                "API_ERROR: HTTP error: connection refused"
            );
        }
    }
}

#[tokio::test]
async fn a_failed_attempt_only_affects_its_own_slot() {
    // Three attempts per row: row 3, attempt 2 is the eighth call.
    let provider = FailingCalls::new([8]);
    let collector = BatchCollector::new(&provider, 3);

    let sets = collector.run(&rows(&["r1", "r2", "r3", "r4"])).await;

    for (row, set) in sets.iter().enumerate() {
        for (slot, answer) in set.answers.iter().enumerate() {
            if row == 2 && slot == 1 {
                assert!(answer.is_failed());
                assert!(answer.as_str().starts_with("API_ERROR: Provider error: quota"));
            } else {
                assert!(!answer.is_failed(), "row {row} slot {slot} should succeed");
            }
        }
    }
    assert_eq!(sets[2].answers[2].as_str(), "r3 #9");
    assert_eq!(sets[3].answers[0].as_str(), "r4 #10");
}

#[tokio::test]
async fn answers_are_trimmed() {
    let provider = Fixed(Some("\n  spaced out answer \t\n"));
    let sets = BatchCollector::new(&provider, 1).run(&rows(&["p"])).await;

    assert_eq!(sets[0].answers, vec![Answer::Text("spaced out answer".to_string())]);
}

#[tokio::test]
async fn textless_response_becomes_a_sentinel() {
    let provider = Fixed(None);
    let sentinel = ErrorSentinel::new("[API wrong: ", 21);
    let sets = BatchCollector::new(&provider, 2)
        .sentinel(sentinel.clone())
        .run(&rows(&["p"]))
        .await;

    assert_eq!(sets[0].failed_count(), 2);
    assert!(sets[0].answers.iter().all(|a| sentinel.matches(a.as_str())));
    assert_eq!(
        sets[0].answers[0].as_str(),
        "[API wrong: Response format error..."
    );
}

#[tokio::test]
async fn progress_reports_rows_failures_and_pauses() {
    let provider = FailingCalls::new([2]);
    let recorder = Recorder::default();
    let pacing = Pacing::new(Duration::ZERO, Duration::from_millis(5));

    BatchCollector::new(&provider, 2)
        .pacing(pacing)
        .progress(&recorder)
        .run(&rows(&["a", "b"]))
        .await;

    assert_eq!(
        recorder.events(),
        [
            "run 2x2",
            "start 1/2",
            "fail 1.2",
            "done 1 (2)",
            "pause 5ms",
            "start 2/2",
            "done 2 (2)",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn pacing_waits_after_each_call_and_between_rows() {
    let provider = EchoProvider::default();
    let pacing = Pacing::new(Duration::from_millis(300), Duration::from_secs(15));
    let collector = BatchCollector::new(&provider, 2).pacing(pacing);

    let start = tokio::time::Instant::now();
    collector.run(&rows(&["a", "b"])).await;
    let elapsed = start.elapsed();

    // Four calls at 300ms each plus a single pause between the two rows.
    let expected = Duration::from_millis(4 * 300) + Duration::from_secs(15);
    assert!(elapsed >= expected, "elapsed {elapsed:?}");
    assert!(elapsed < expected + Duration::from_millis(100), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn failed_calls_are_paced_too() {
    let pacing = Pacing::new(Duration::from_millis(250), Duration::ZERO);
    let collector = BatchCollector::new(&AlwaysFails, 3).pacing(pacing);

    let start = tokio::time::Instant::now();
    collector.run(&rows(&["a"])).await;

    assert!(start.elapsed() >= Duration::from_millis(750));
}

#[tokio::test]
async fn repeated_runs_are_identical_for_a_deterministic_provider() {
    let input = rows(&["x", "y"]);
    let first = BatchCollector::new(&EchoProvider::default(), 3).run(&input).await;
    let second = BatchCollector::new(&EchoProvider::default(), 3).run(&input).await;

    assert_eq!(first, second);
}
