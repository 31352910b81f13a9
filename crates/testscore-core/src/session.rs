//! Session tracking: per-question timers, recorded answers, and results.
//!
//! A [`SessionTracker`] owns all state for one test run. It is driven by the
//! caller (start a timer, record an answer) and never runs anything on its
//! own. Lookups for unknown question ids return `None`/zero rather than
//! failing, so a partially recorded session is always usable.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use testscore_core::clock::ManualClock;
//! use testscore_core::config::ScoringConfig;
//! use testscore_core::model::Question;
//! use testscore_core::session::SessionTracker;
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let mut tracker = SessionTracker::with_clock(ScoringConfig::STANDARD, clock.clone());
//! let questions = vec![Question::new("q1", "a", 1)];
//!
//! tracker.start_test();
//! tracker.start_question_timer("q1");
//! clock.advance_secs(10);
//! tracker.record_answer("q1", json!("a"));
//!
//! let results = tracker.test_results(&questions);
//! assert_eq!(results.summary.total_score, 1);
//! assert_eq!(results.completion_rate, 100);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::ScoringConfig;
use crate::error::CoreError;
use crate::model::{Answer, AnswerRecord, Question, QuestionResult, TimingRecord};
use crate::scoring::calculate_score;
use crate::statistics::{calculate_total_score, percent, round2, TotalScoreSummary};

/// Whole seconds between two epoch-millisecond instants, never negative.
fn seconds_between(start_ms: i64, end_ms: i64) -> u64 {
    (end_ms.saturating_sub(start_ms).max(0) as f64 / 1000.0).round() as u64
}

/// Full results of a session over a question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub summary: TotalScoreSummary,
    /// Questions in the list that have a recorded answer.
    pub answered_questions: u32,
    /// `round(answered / total * 100)`, or 0 for an empty list.
    pub completion_rate: u32,
    /// Seconds since `start_test`, or 0 if the test was never started.
    pub test_duration: u64,
}

/// A lightweight live snapshot for in-progress display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStats {
    pub answered_questions: u32,
    pub elapsed_seconds: u64,
    /// Mean time over answered questions, to 2 decimals.
    pub average_time_per_question: f64,
}

/// Serializable tracker state, sufficient to rebuild an equivalent tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub answers: HashMap<String, AnswerRecord>,
    #[serde(default)]
    pub timings: HashMap<String, TimingRecord>,
    #[serde(default)]
    pub test_start_time: Option<i64>,
    #[serde(default)]
    pub config: ScoringConfig,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(CoreError::SnapshotEncode)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(CoreError::InvalidSnapshot)
    }
}

/// Stateful tracker for a single test session.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    config: ScoringConfig,
    answers: HashMap<String, AnswerRecord>,
    timings: HashMap<String, TimingRecord>,
    test_start_time: Option<i64>,
    clock: Arc<dyn Clock>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl SessionTracker {
    /// Create a tracker reading the system clock.
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ScoringConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            answers: HashMap::new(),
            timings: HashMap::new(),
            test_start_time: None,
            clock,
        }
    }

    /// Rebuild a tracker from an exported snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot, clock: Arc<dyn Clock>) -> Self {
        let mut tracker = Self::with_clock(snapshot.config, clock);
        tracker.import_state(snapshot);
        tracker
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Mark the start of the test. Calling again resets the duration
    /// baseline but keeps recorded answers.
    pub fn start_test(&mut self) {
        let now = self.clock.now_ms();
        tracing::debug!(at = now, "test started");
        self.test_start_time = Some(now);
    }

    /// Start (or restart) the timer for a question, discarding any
    /// unfinished or finished timing for it.
    pub fn start_question_timer(&mut self, question_id: &str) {
        let now = self.clock.now_ms();
        tracing::debug!(question = question_id, at = now, "question timer started");
        self.timings
            .insert(question_id.to_string(), TimingRecord::started_at(now));
    }

    /// Record an answer, stopping the question's timer.
    ///
    /// Without a started timer the time taken is 0. Answering again replaces
    /// the previous answer; a timer that already stopped keeps its duration.
    pub fn record_answer(&mut self, question_id: &str, answer: impl Into<Answer>) {
        let now = self.clock.now_ms();

        let time_taken_seconds = match self.timings.get_mut(question_id) {
            Some(timing) => match timing.duration_seconds {
                Some(duration) if timing.is_finished() => duration,
                _ => {
                    let end = now.max(timing.start_time);
                    let duration = seconds_between(timing.start_time, end);
                    timing.end_time = Some(end);
                    timing.duration_seconds = Some(duration);
                    duration
                }
            },
            None => {
                tracing::debug!(question = question_id, "answer recorded without a timer");
                0
            }
        };

        tracing::debug!(
            question = question_id,
            time_taken_seconds,
            replaced = self.answers.contains_key(question_id),
            "answer recorded"
        );

        self.answers.insert(
            question_id.to_string(),
            AnswerRecord {
                answer: answer.into(),
                answered_at_timestamp: now,
                time_taken_seconds,
            },
        );
    }

    /// Clear all answers, timings, and the session start for reuse.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.timings.clear();
        self.test_start_time = None;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_question_answered(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn user_answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id).map(|r| &r.answer)
    }

    pub fn answer_record(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers.get(question_id)
    }

    pub fn question_timing(&self, question_id: &str) -> Option<&TimingRecord> {
        self.timings.get(question_id)
    }

    /// Seconds since `start_test`, or 0 if never started.
    pub fn elapsed_seconds(&self) -> u64 {
        self.test_start_time
            .map(|start| seconds_between(start, self.clock.now_ms()))
            .unwrap_or(0)
    }

    // ── Scoring ──────────────────────────────────────────────────────

    /// Score the stored answer for `question_id` against `question`.
    pub fn calculate_question_score(&self, question: &Question, question_id: &str) -> u32 {
        match self.answers.get(question_id) {
            Some(record) => calculate_score(
                question,
                Some(&record.answer),
                record.time_taken_seconds as f64,
                &self.config,
            ),
            None => 0,
        }
    }

    /// Pair every question with its stored answer and score.
    ///
    /// A question id is scored at most once; later repeats are skipped.
    pub fn calculate_all_scores(&self, questions: &[Question]) -> Vec<QuestionResult> {
        let mut seen = HashSet::new();
        questions
            .iter()
            .filter(|q| {
                let first = seen.insert(q.id.as_str());
                if !first {
                    tracing::warn!(question = %q.id, "duplicate question id skipped");
                }
                first
            })
            .map(|q| match self.answers.get(&q.id) {
                Some(record) => QuestionResult {
                    question: q.clone(),
                    user_answer: Some(record.answer.clone()),
                    time_taken: record.time_taken_seconds,
                    score: self.calculate_question_score(q, &q.id),
                    is_answered: true,
                },
                None => QuestionResult::unanswered(q.clone()),
            })
            .collect()
    }

    /// Score and aggregate the session over `questions`.
    pub fn test_results(&self, questions: &[Question]) -> TestResults {
        let results = self.calculate_all_scores(questions);
        let summary = calculate_total_score(&results, &self.config);
        let answered_questions = results.iter().filter(|r| r.is_answered).count() as u32;
        let total = results.len() as u32;

        TestResults {
            summary,
            answered_questions,
            completion_rate: percent(answered_questions, total),
            test_duration: self.elapsed_seconds(),
        }
    }

    /// Live counts for an in-progress test.
    pub fn current_stats(&self) -> CurrentStats {
        let answered = self.answers.len() as u32;
        let average_time_per_question = if answered == 0 {
            0.0
        } else {
            let total = self
                .answers
                .values()
                .fold(0u64, |acc, r| acc.saturating_add(r.time_taken_seconds));
            round2(total as f64 / answered as f64)
        };

        CurrentStats {
            answered_questions: answered,
            elapsed_seconds: self.elapsed_seconds(),
            average_time_per_question,
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn export_state(&self) -> SessionSnapshot {
        SessionSnapshot {
            answers: self.answers.clone(),
            timings: self.timings.clone(),
            test_start_time: self.test_start_time,
            config: self.config,
        }
    }

    /// Replace all state, including the config, with the snapshot's.
    pub fn import_state(&mut self, snapshot: SessionSnapshot) {
        tracing::debug!(
            answers = snapshot.answers.len(),
            timings = snapshot.timings.len(),
            "session state imported"
        );
        self.answers = snapshot.answers;
        self.timings = snapshot.timings;
        self.test_start_time = snapshot.test_start_time;
        self.config = snapshot.config;
    }
}
