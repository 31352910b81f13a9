//! The `testscore score` command.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use testscore_core::clock::ManualClock;
use testscore_core::config::validate_scoring_config;
use testscore_core::model::Question;
use testscore_core::parser;
use testscore_core::session::{SessionSnapshot, SessionTracker};
use testscore_report::grading::{format_test_results, DisplayReport};
use testscore_report::html::{generate_html, write_html_report};

use crate::config::resolve_scoring;

pub fn execute(
    questions_path: PathBuf,
    session_path: PathBuf,
    preset: Option<String>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let questions = load_questions(&questions_path)?;

    let content = std::fs::read_to_string(&session_path)
        .with_context(|| format!("failed to read session from {}", session_path.display()))?;
    let mut snapshot = SessionSnapshot::from_json(&content)
        .with_context(|| format!("failed to load session from {}", session_path.display()))?;

    if let Some(scoring) = resolve_scoring(config_path.as_deref(), preset.as_deref())? {
        snapshot.config = scoring;
    }

    let validation = validate_scoring_config(&snapshot.config);
    if !validation.is_valid {
        tracing::warn!(
            total = validation.total,
            "scoring weights are not normalized; percentages may be skewed"
        );
    }

    let known: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    for id in snapshot.answers.keys() {
        if !known.contains(id.as_str()) {
            tracing::warn!("answer for unknown question '{id}' ignored");
        }
    }

    // Session duration runs up to the last recorded activity.
    let clock = Arc::new(ManualClock::new(last_activity_ms(&snapshot)));
    let tracker = SessionTracker::from_snapshot(snapshot, clock);
    let results = tracker.test_results(&questions);
    let report = format_test_results(&results);

    if format == "html" {
        if let Some(path) = &output {
            write_html_report(&report, path)?;
            eprintln!("HTML report: {}", path.display());
            return Ok(());
        }
    }

    let rendered = match format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        "markdown" | "md" => report.to_markdown(),
        "html" => generate_html(&report),
        "text" => render_text(&report),
        other => anyhow::bail!("unknown format: {other}"),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let sets = parser::load_question_sets(path)?;
    Ok(sets.into_iter().flat_map(|s| s.questions).collect())
}

/// Latest timestamp recorded in the snapshot, in epoch milliseconds.
fn last_activity_ms(snapshot: &SessionSnapshot) -> i64 {
    let answers = snapshot.answers.values().map(|a| a.answered_at_timestamp);
    let timings = snapshot
        .timings
        .values()
        .flat_map(|t| [Some(t.start_time), t.end_time])
        .flatten();

    answers
        .chain(timings)
        .chain(snapshot.test_start_time)
        .max()
        .unwrap_or(0)
}

fn render_text(report: &DisplayReport) -> String {
    let s = &report.summary;
    let mut out = format!("Grade: {} ({})\n\n", report.grade, report.performance);

    let mut summary = Table::new();
    summary.set_header(vec!["Score", "Max", "Percent", "Correct", "Avg Time", "Completion", "Duration"]);
    summary.add_row(vec![
        Cell::new(s.total_score),
        Cell::new(s.max_possible_score),
        Cell::new(format!("{}%", s.percentage)),
        Cell::new(format!("{}/{}", s.correct_answers, s.total_questions)),
        Cell::new(format!("{:.2}s", s.average_time_seconds)),
        Cell::new(
            report
                .completion_rate
                .map(|r| format!("{r}%"))
                .unwrap_or_else(|| "-".into()),
        ),
        Cell::new(
            report
                .test_duration
                .map(|d| format!("{d}s"))
                .unwrap_or_else(|| "-".into()),
        ),
    ]);
    out.push_str(&format!("{summary}\n"));

    if !s.difficulty_breakdown.is_empty() {
        let mut breakdown = Table::new();
        breakdown.set_header(vec!["Difficulty", "Correct", "Total", "Score"]);
        for (difficulty, bucket) in &s.difficulty_breakdown {
            breakdown.add_row(vec![
                Cell::new(difficulty),
                Cell::new(bucket.correct),
                Cell::new(bucket.total),
                Cell::new(bucket.total_score),
            ]);
        }
        out.push_str(&format!("\n{breakdown}\n"));
    }

    out.push_str("\nRecommendations:\n");
    for rec in &report.recommendations {
        out.push_str(&format!("  - {rec}\n"));
    }
    out
}
