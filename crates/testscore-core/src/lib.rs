//! testscore-core: Scoring, timing, and session tracking for assessments.
//!
//! This crate scores answered questions from correctness, difficulty, and
//! response time, tracks per-question timers and answers across a test
//! session, and aggregates the results into a summary.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod statistics;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{validate_scoring_config, ConfigValidation, ScoringConfig, ScoringPreset};
pub use error::CoreError;
pub use model::{Answer, AnswerRecord, Question, QuestionResult, QuestionSet, ScoreWeight, TimingRecord};
pub use scoring::{calculate_score, calculate_time_efficiency};
pub use session::{CurrentStats, SessionSnapshot, SessionTracker, TestResults};
pub use statistics::{calculate_total_score, DifficultyBucket, TotalScoreSummary};
