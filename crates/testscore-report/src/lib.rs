//! testscore-report: Grading and report rendering.
//!
//! Turns a scored session into a [`DisplayReport`](grading::DisplayReport)
//! with a letter grade, performance tier, and recommendations, and renders
//! it as markdown or a self-contained HTML page.

pub mod grading;
pub mod html;

pub use grading::{format_summary, format_test_results, DisplayReport, Grade, PerformanceTier};
