//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use testscore_core::statistics::DifficultyBucket;

use crate::grading::{DisplayReport, Grade};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn grade_class(grade: Grade) -> &'static str {
    match grade {
        Grade::A | Grade::B => "pass",
        Grade::C | Grade::D => "warn",
        Grade::F => "fail",
    }
}

/// Generate an HTML page from a display report.
pub fn generate_html(report: &DisplayReport) -> String {
    let s = &report.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>testscore report: grade {}</title>\n",
        report.grade
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>testscore report</h1>\n");
    html.push_str(&format!(
        "<p class=\"grade {}\">Grade <strong>{}</strong> | {}</p>\n",
        grade_class(report.grade),
        report.grade,
        html_escape(&report.performance.to_string())
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Score</th><td>{} / {} ({}%)</td></tr>\n",
        s.total_score, s.max_possible_score, s.percentage
    ));
    html.push_str(&format!(
        "<tr><th>Correct</th><td>{} / {}</td></tr>\n",
        s.correct_answers, s.total_questions
    ));
    html.push_str(&format!(
        "<tr><th>Average time</th><td>{:.2}s</td></tr>\n",
        s.average_time_seconds
    ));
    if let Some(rate) = report.completion_rate {
        html.push_str(&format!("<tr><th>Completion</th><td>{rate}%</td></tr>\n"));
    }
    if let Some(duration) = report.test_duration {
        html.push_str(&format!("<tr><th>Duration</th><td>{duration}s</td></tr>\n"));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Difficulty breakdown
    if !s.difficulty_breakdown.is_empty() {
        html.push_str("<section class=\"breakdown\">\n");
        html.push_str("<h2>By difficulty</h2>\n");
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>Difficulty</th><th>Correct</th><th>Total</th><th>Score</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for (difficulty, bucket) in &s.difficulty_breakdown {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                difficulty, bucket.correct, bucket.total, bucket.total_score
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&s.difficulty_breakdown));
        html.push_str("</section>\n");
    }

    // Recommendations
    html.push_str("<section class=\"recommendations\">\n");
    html.push_str("<h2>Recommendations</h2>\n<ul>\n");
    for rec in &report.recommendations {
        html.push_str(&format!("<li>{}</li>\n", html_escape(rec)));
    }
    html.push_str("</ul>\n</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &DisplayReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bars showing accuracy per difficulty.
fn generate_bar_chart(breakdown: &BTreeMap<u8, DifficultyBucket>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = breakdown.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (difficulty, bucket)) in breakdown.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let accuracy = bucket.accuracy().unwrap_or(0.0);
        let width = (accuracy * max_width as f64) as usize;

        let color = if accuracy >= 0.8 {
            "#22c55e"
        } else if accuracy >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Level {}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            difficulty
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            accuracy * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.grade { display: inline-block; padding: 0.5rem 1rem; border-radius: 8px; font-size: 1.25rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
