//! Core data model types for testscore.
//!
//! Questions are owned by the caller and only read here. Timing and answer
//! records are owned by a [`SessionTracker`](crate::session::SessionTracker).

use serde::{Deserialize, Serialize};

/// An opaque answer value, compared to the correct answer by equality.
///
/// `Value::Null` is treated as "no answer".
pub type Answer = serde_json::Value;

/// Lowest difficulty rating.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty rating.
pub const MAX_DIFFICULTY: u8 = 5;

/// A single question as described by the question source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier within a test.
    pub id: String,
    /// The value a submitted answer must equal to score.
    pub correct_answer: Answer,
    /// Difficulty rating, expected in 1..=5. Clamped at use time.
    #[serde(default = "default_difficulty")]
    pub difficulty: i64,
    /// Per-question weights. [`ScoreWeight::default`] applies when absent.
    #[serde(default)]
    pub score_weight: Option<ScoreWeight>,
}

fn default_difficulty() -> i64 {
    3
}

impl Question {
    pub fn new(id: impl Into<String>, correct_answer: impl Into<Answer>, difficulty: i64) -> Self {
        Self {
            id: id.into(),
            correct_answer: correct_answer.into(),
            difficulty,
            score_weight: None,
        }
    }

    pub fn with_score_weight(mut self, weight: ScoreWeight) -> Self {
        self.score_weight = Some(weight);
        self
    }

    /// Difficulty clamped into `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    pub fn clamped_difficulty(&self) -> u8 {
        self.difficulty
            .clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u8
    }

    /// The effective score weight (the default when none was given).
    pub fn weight(&self) -> ScoreWeight {
        self.score_weight.unwrap_or_default()
    }
}

/// Per-question scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeight {
    /// Points awarded for any correct answer.
    pub base: f64,
    /// Points per difficulty level before global weighting.
    pub difficulty_bonus: f64,
    /// Carried through from the question source; not used by the formula.
    #[serde(default = "default_time_factor")]
    pub time_factor: f64,
}

fn default_time_factor() -> f64 {
    1.0
}

impl Default for ScoreWeight {
    fn default() -> Self {
        Self {
            base: 5.0,
            difficulty_bonus: 2.0,
            time_factor: 1.0,
        }
    }
}

/// A named collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Unique identifier for this question set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this question set.
    #[serde(default)]
    pub description: String,
    /// The questions, in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Timer state for one question in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingRecord {
    /// Epoch milliseconds when the timer started.
    pub start_time: i64,
    /// Epoch milliseconds when the answer was recorded.
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Whole seconds between start and end.
    #[serde(default)]
    pub duration_seconds: Option<u64>,
}

impl TimingRecord {
    pub fn started_at(start_time: i64) -> Self {
        Self {
            start_time,
            end_time: None,
            duration_seconds: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

/// The answer recorded for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub answer: Answer,
    /// Epoch milliseconds when the answer was recorded.
    pub answered_at_timestamp: i64,
    pub time_taken_seconds: u64,
}

/// A question paired with its outcome in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: Question,
    pub user_answer: Option<Answer>,
    pub time_taken: u64,
    pub score: u32,
    pub is_answered: bool,
}

impl QuestionResult {
    /// Result for a question that was never answered.
    pub fn unanswered(question: Question) -> Self {
        Self {
            question,
            user_answer: None,
            time_taken: 0,
            score: 0,
            is_answered: false,
        }
    }
}
