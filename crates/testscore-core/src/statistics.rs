//! Aggregate statistics over a set of question results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::model::QuestionResult;
use crate::scoring::max_possible_score;

/// Totals for one difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBucket {
    /// Results with a score above zero.
    pub correct: u32,
    /// All results at this difficulty.
    pub total: u32,
    /// Sum of scores at this difficulty.
    pub total_score: u32,
}

impl DifficultyBucket {
    /// Fraction of correct results, or `None` for an empty bucket.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }
}

/// Summary of a scored test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalScoreSummary {
    pub total_score: u32,
    pub max_possible_score: u32,
    /// `round(total / max * 100)`, or 0 when the maximum is 0.
    pub percentage: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Mean time across all results, unanswered counting as 0, to 2 decimals.
    pub average_time_seconds: f64,
    /// Keyed by clamped difficulty.
    pub difficulty_breakdown: BTreeMap<u8, DifficultyBucket>,
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64 * 100.0).round() as u32
    }
}

/// Aggregate per-question results into a summary.
///
/// Every result counts toward the totals, answered or not. Sums saturate
/// at the integer maximum. The maximum
/// possible score assumes every question answered correctly at the best
/// time efficiency.
pub fn calculate_total_score(results: &[QuestionResult], config: &ScoringConfig) -> TotalScoreSummary {
    if results.is_empty() {
        return TotalScoreSummary::default();
    }

    let mut total_score = 0u32;
    let mut max_possible = 0u32;
    let mut correct_answers = 0u32;
    let mut total_time = 0u64;
    let mut difficulty_breakdown: BTreeMap<u8, DifficultyBucket> = BTreeMap::new();

    for r in results {
        let is_correct = r.score > 0;
        total_score = total_score.saturating_add(r.score);
        max_possible = max_possible.saturating_add(max_possible_score(&r.question, config));
        total_time = total_time.saturating_add(r.time_taken);
        if is_correct {
            correct_answers += 1;
        }

        let bucket = difficulty_breakdown
            .entry(r.question.clamped_difficulty())
            .or_default();
        bucket.total += 1;
        bucket.total_score = bucket.total_score.saturating_add(r.score);
        if is_correct {
            bucket.correct += 1;
        }
    }

    let total_questions = results.len() as u32;
    let average_time_seconds = round2(total_time as f64 / total_questions as f64);

    TotalScoreSummary {
        total_score,
        max_possible_score: max_possible,
        percentage: percent(total_score, max_possible),
        correct_answers,
        total_questions,
        average_time_seconds,
        difficulty_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, ScoreWeight};
    use crate::scoring::calculate_score;
    use serde_json::json;

    fn result(id: &str, difficulty: i64, score: u32, time_taken: u64) -> QuestionResult {
        QuestionResult {
            question: Question::new(id, "a", difficulty),
            user_answer: Some(json!("a")),
            time_taken,
            score,
            is_answered: true,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = calculate_total_score(&[], &ScoringConfig::STANDARD);
        assert_eq!(summary.total_score, 0);
        assert_eq!(summary.max_possible_score, 0);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.correct_answers, 0);
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.average_time_seconds, 0.0);
        assert!(summary.difficulty_breakdown.is_empty());
    }

    #[test]
    fn two_correct_results() {
        let results = vec![result("q1", 1, 1, 10), result("q3", 3, 2, 35)];
        let summary = calculate_total_score(&results, &ScoringConfig::STANDARD);
        assert_eq!(summary.total_score, 3);
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.total_questions, 2);
        // Ceilings: round(6.4 * 0.2) = 1 and round(9.2 * 0.2) = 2.
        assert_eq!(summary.max_possible_score, 3);
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.average_time_seconds, 22.5);
    }

    #[test]
    fn unanswered_results_count_toward_totals() {
        let results = vec![
            result("q1", 2, 4, 12),
            QuestionResult::unanswered(Question::new("q2", "b", 2)),
            QuestionResult::unanswered(Question::new("q3", "c", 4)),
        ];
        let summary = calculate_total_score(&results, &ScoringConfig::ACCURACY_FOCUSED);
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.correct_answers, 1);
        assert_eq!(summary.average_time_seconds, 4.0);
        assert!(summary.max_possible_score > summary.total_score);

        let d2 = summary.difficulty_breakdown[&2];
        assert_eq!(d2, DifficultyBucket { correct: 1, total: 2, total_score: 4 });
        let d4 = summary.difficulty_breakdown[&4];
        assert_eq!(d4.accuracy(), Some(0.0));
    }

    #[test]
    fn total_equals_sum_of_scores() {
        let results: Vec<QuestionResult> = (0..20)
            .map(|i| result(&format!("q{i}"), (i % 5) as i64 + 1, (i * 7 % 4) as u32, i as u64))
            .collect();
        let summary = calculate_total_score(&results, &ScoringConfig::BALANCED_SPEED);
        let sum: u32 = results.iter().map(|r| r.score).sum();
        assert_eq!(summary.total_score, sum);
        let bucket_sum: u32 = summary
            .difficulty_breakdown
            .values()
            .map(|b| b.total_score)
            .sum();
        assert_eq!(bucket_sum, sum);
    }

    #[test]
    fn average_time_rounds_to_two_decimals() {
        let results = vec![result("a", 1, 1, 10), result("b", 1, 1, 10), result("c", 1, 0, 0)];
        let summary = calculate_total_score(&results, &ScoringConfig::STANDARD);
        assert_eq!(summary.average_time_seconds, 6.67);
    }

    #[test]
    fn breakdown_uses_clamped_difficulty() {
        let results = vec![result("a", 0, 1, 5), result("b", 8, 0, 5)];
        let summary = calculate_total_score(&results, &ScoringConfig::STANDARD);
        let keys: Vec<u8> = summary.difficulty_breakdown.keys().copied().collect();
        assert_eq!(keys, vec![1, 5]);
    }

    #[test]
    fn huge_weights_saturate_instead_of_overflowing() {
        let config = ScoringConfig::new(0.0, 0.0, 1.0);
        let heavy = ScoreWeight {
            base: 3.0e9,
            difficulty_bonus: 0.0,
            time_factor: 1.0,
        };
        let results: Vec<QuestionResult> = ["q1", "q2"]
            .iter()
            .map(|id| {
                let question = Question::new(*id, "a", 3).with_score_weight(heavy);
                let score = calculate_score(&question, Some(&json!("a")), 10.0, &config);
                QuestionResult {
                    question,
                    user_answer: Some(json!("a")),
                    time_taken: 10,
                    score,
                    is_answered: true,
                }
            })
            .collect();
        assert_eq!(results[0].score, 3_000_000_000);

        let summary = calculate_total_score(&results, &config);
        assert_eq!(summary.total_score, u32::MAX);
        assert_eq!(summary.max_possible_score, u32::MAX);
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.difficulty_breakdown[&3].total_score, u32::MAX);
    }

    #[test]
    fn percent_guards_zero() {
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }
}
