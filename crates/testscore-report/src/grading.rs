//! Turns scored results into a human-facing report: letter grade,
//! performance tier, and study recommendations.

use std::fmt;

use serde::{Deserialize, Serialize};

use testscore_core::session::TestResults;
use testscore_core::statistics::TotalScoreSummary;

/// Accuracy below which the advanced-practice recommendation fires.
const ADVANCED_ACCURACY_FLOOR: f64 = 0.5;
/// Difficulty levels checked for the advanced-practice recommendation.
const ADVANCED_DIFFICULTIES: [u8; 2] = [3, 4];

pub const FUNDAMENTALS_ADVICE: &str =
    "Review the fundamentals and look for patterns in the questions you missed.";
pub const SPEED_ADVICE: &str =
    "Practice timed drills to bring your average response time under 90 seconds.";
pub const ADVANCED_ADVICE: &str =
    "Work through more medium and hard problems to build confidence with advanced material.";
pub const TIME_MANAGEMENT_ADVICE: &str =
    "Manage your time so every question gets an answer; unanswered questions score nothing.";
pub const KEEP_GOING_ADVICE: &str =
    "Excellent work! Keep practicing to maintain this level of performance.";

/// Letter grade derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 90 {
            Grade::A
        } else if percentage >= 80 {
            Grade::B
        } else if percentage >= 70 {
            Grade::C
        } else if percentage >= 60 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{s}")
    }
}

/// Overall performance, combining accuracy and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    BelowAverage,
    NeedsImprovement,
}

impl PerformanceTier {
    /// First matching rule wins.
    pub fn classify(percentage: u32, average_time_seconds: f64) -> Self {
        if percentage >= 80 && average_time_seconds <= 45.0 {
            PerformanceTier::Excellent
        } else if percentage >= 70 && average_time_seconds <= 60.0 {
            PerformanceTier::Good
        } else if percentage >= 60 {
            PerformanceTier::Average
        } else if percentage >= 50 {
            PerformanceTier::BelowAverage
        } else {
            PerformanceTier::NeedsImprovement
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PerformanceTier::Excellent => "Excellent",
            PerformanceTier::Good => "Good",
            PerformanceTier::Average => "Average",
            PerformanceTier::BelowAverage => "Below Average",
            PerformanceTier::NeedsImprovement => "Needs Improvement",
        };
        write!(f, "{s}")
    }
}

/// A formatted, explainable test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayReport {
    pub grade: Grade,
    pub performance: PerformanceTier,
    /// Never empty.
    pub recommendations: Vec<String>,
    pub summary: TotalScoreSummary,
    /// Present when formatted from full session results.
    #[serde(default)]
    pub answered_questions: Option<u32>,
    #[serde(default)]
    pub completion_rate: Option<u32>,
    #[serde(default)]
    pub test_duration: Option<u64>,
}

/// Build the ordered recommendation list. Checks are independent; when none
/// fires a single positive message is returned.
pub fn recommendations(summary: &TotalScoreSummary, completion_rate: Option<u32>) -> Vec<String> {
    let mut recs = Vec::new();

    if summary.percentage < 70 {
        recs.push(FUNDAMENTALS_ADVICE.to_string());
    }

    if summary.average_time_seconds > 90.0 {
        recs.push(SPEED_ADVICE.to_string());
    }

    let weak_on_advanced = ADVANCED_DIFFICULTIES.iter().any(|d| {
        summary
            .difficulty_breakdown
            .get(d)
            .and_then(|bucket| bucket.accuracy())
            .is_some_and(|accuracy| accuracy < ADVANCED_ACCURACY_FLOOR)
    });
    if weak_on_advanced {
        recs.push(ADVANCED_ADVICE.to_string());
    }

    if completion_rate.is_some_and(|rate| rate < 100) {
        recs.push(TIME_MANAGEMENT_ADVICE.to_string());
    }

    if recs.is_empty() {
        recs.push(KEEP_GOING_ADVICE.to_string());
    }

    recs
}

/// Format full session results, including the completion check.
pub fn format_test_results(results: &TestResults) -> DisplayReport {
    let summary = &results.summary;
    DisplayReport {
        grade: Grade::from_percentage(summary.percentage),
        performance: PerformanceTier::classify(summary.percentage, summary.average_time_seconds),
        recommendations: recommendations(summary, Some(results.completion_rate)),
        summary: summary.clone(),
        answered_questions: Some(results.answered_questions),
        completion_rate: Some(results.completion_rate),
        test_duration: Some(results.test_duration),
    }
}

/// Format a bare summary. Completion is unknown, so that check is skipped.
pub fn format_summary(summary: &TotalScoreSummary) -> DisplayReport {
    DisplayReport {
        grade: Grade::from_percentage(summary.percentage),
        performance: PerformanceTier::classify(summary.percentage, summary.average_time_seconds),
        recommendations: recommendations(summary, None),
        summary: summary.clone(),
        answered_questions: None,
        completion_rate: None,
        test_duration: None,
    }
}

impl DisplayReport {
    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut md = String::new();

        md.push_str(&format!(
            "**Grade:** {} | **Performance:** {}\n\n",
            self.grade, self.performance
        ));

        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!(
            "| Score | {}/{} ({}%) |\n",
            s.total_score, s.max_possible_score, s.percentage
        ));
        md.push_str(&format!(
            "| Correct | {}/{} |\n",
            s.correct_answers, s.total_questions
        ));
        md.push_str(&format!(
            "| Avg time | {:.2}s |\n",
            s.average_time_seconds
        ));
        if let Some(rate) = self.completion_rate {
            md.push_str(&format!("| Completion | {rate}% |\n"));
        }
        if let Some(duration) = self.test_duration {
            md.push_str(&format!("| Duration | {duration}s |\n"));
        }
        md.push('\n');

        if !s.difficulty_breakdown.is_empty() {
            md.push_str("### By difficulty\n\n");
            md.push_str("| Difficulty | Correct | Total | Score |\n");
            md.push_str("|------------|---------|-------|-------|\n");
            for (difficulty, bucket) in &s.difficulty_breakdown {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    difficulty, bucket.correct, bucket.total, bucket.total_score
                ));
            }
            md.push('\n');
        }

        md.push_str("### Recommendations\n\n");
        for rec in &self.recommendations {
            md.push_str(&format!("- {rec}\n"));
        }

        md
    }
}
