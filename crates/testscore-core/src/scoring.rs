//! Per-question scoring.
//!
//! A correct answer earns `base + difficultyScore + timeBonus`, scaled by the
//! accuracy weight and rounded half away from zero. Wrong or unscoreable
//! answers earn zero.

use crate::config::ScoringConfig;
use crate::model::{Answer, Question};

/// Base time thresholds in seconds, before difficulty scaling.
pub const EXCELLENT_SECS: f64 = 15.0;
pub const GOOD_SECS: f64 = 30.0;
pub const AVERAGE_SECS: f64 = 60.0;
pub const SLOW_SECS: f64 = 120.0;

/// The best achievable time efficiency factor.
pub const MAX_TIME_EFFICIENCY: f64 = 2.0;

/// Scoring multiplier for a clamped difficulty in 1..=5.
pub fn difficulty_multiplier(difficulty: u8) -> f64 {
    match difficulty {
        0 | 1 => 0.8,
        2 => 1.0,
        3 => 1.2,
        4 => 1.5,
        _ => 2.0,
    }
}

/// Difficulty-scaled time thresholds: (excellent, good, average, slow).
pub fn time_thresholds(difficulty: u8) -> [f64; 4] {
    let steps = difficulty.saturating_sub(1) as f64;
    [
        EXCELLENT_SECS * (1.0 + steps * 0.2),
        GOOD_SECS * (1.0 + steps * 0.3),
        AVERAGE_SECS * (1.0 + steps * 0.4),
        SLOW_SECS * (1.0 + steps * 0.5),
    ]
}

/// Map a response time to an efficiency factor in {2.0, 1.5, 1.0, 0.5, 0.2}.
///
/// Tiers are inclusive on the upper bound and checked fastest first.
pub fn calculate_time_efficiency(time_taken_secs: f64, difficulty: u8) -> f64 {
    let [excellent, good, average, slow] = time_thresholds(difficulty);

    if time_taken_secs <= excellent {
        2.0
    } else if time_taken_secs <= good {
        1.5
    } else if time_taken_secs <= average {
        1.0
    } else if time_taken_secs <= slow {
        0.5
    } else {
        0.2
    }
}

/// The difficulty component of a question's preliminary score.
fn difficulty_score(question: &Question, config: &ScoringConfig) -> f64 {
    let difficulty = question.clamped_difficulty();
    difficulty as f64
        * question.weight().difficulty_bonus
        * config.difficulty_weight
        * difficulty_multiplier(difficulty)
}

fn round_score(value: f64) -> u32 {
    // f64::round rounds half away from zero; the cast saturates at u32::MAX.
    value.max(0.0).round() as u32
}

/// Score a single answered question.
///
/// Returns 0 for a wrong answer, a missing answer, or a negative or
/// non-finite time. Malformed input is logged at `warn` and never fails.
pub fn calculate_score(
    question: &Question,
    user_answer: Option<&Answer>,
    time_taken_secs: f64,
    config: &ScoringConfig,
) -> u32 {
    let answer = match user_answer {
        Some(a) if !a.is_null() => a,
        _ => {
            tracing::warn!(question = %question.id, "no answer supplied, scoring as 0");
            return 0;
        }
    };

    if !time_taken_secs.is_finite() || time_taken_secs < 0.0 {
        tracing::warn!(
            question = %question.id,
            time_taken_secs,
            "invalid time taken, scoring as 0"
        );
        return 0;
    }

    if *answer != question.correct_answer {
        return 0;
    }

    let difficulty = question.clamped_difficulty();
    let weight = question.weight();
    let difficulty_score = difficulty_score(question, config);
    let time_efficiency = calculate_time_efficiency(time_taken_secs, difficulty);
    let time_bonus = time_efficiency * config.time_weight;

    let preliminary = weight.base + difficulty_score + time_bonus;
    let final_score = preliminary * config.accuracy_weight;

    tracing::debug!(
        question = %question.id,
        difficulty,
        difficulty_score,
        time_efficiency,
        time_bonus,
        preliminary,
        final_score,
        "scored question"
    );

    round_score(final_score)
}

/// Theoretical ceiling for a question: correct, with the best time efficiency.
///
/// Uses the maximum efficiency regardless of difficulty-scaled thresholds,
/// so percentages across mixed difficulties are approximate.
pub fn max_possible_score(question: &Question, config: &ScoringConfig) -> u32 {
    let preliminary = question.weight().base
        + difficulty_score(question, config)
        + MAX_TIME_EFFICIENCY * config.time_weight;
    round_score(preliminary * config.accuracy_weight)
}
