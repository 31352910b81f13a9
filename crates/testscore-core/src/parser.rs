//! TOML question set parser.
//!
//! Loads question sets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answer, Question, QuestionSet, ScoreWeight, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Intermediate TOML structure for parsing question set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    correct_answer: Answer,
    #[serde(default = "default_difficulty")]
    difficulty: i64,
    #[serde(default)]
    score_weight: Option<TomlScoreWeight>,
}

fn default_difficulty() -> i64 {
    3
}

#[derive(Debug, Deserialize)]
struct TomlScoreWeight {
    #[serde(default = "default_base")]
    base: f64,
    #[serde(default = "default_difficulty_bonus")]
    difficulty_bonus: f64,
    #[serde(default = "default_time_factor")]
    time_factor: f64,
}

fn default_base() -> f64 {
    ScoreWeight::default().base
}

fn default_difficulty_bonus() -> f64 {
    ScoreWeight::default().difficulty_bonus
}

fn default_time_factor() -> f64 {
    ScoreWeight::default().time_factor
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet`.
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            correct_answer: q.correct_answer,
            difficulty: q.difficulty,
            score_weight: q.score_weight.map(|w| ScoreWeight {
                base: w.base,
                difficulty_bonus: w.difficulty_bonus,
                time_factor: w.time_factor,
            }),
        })
        .collect();

    Ok(QuestionSet {
        id: parsed.question_set.id,
        name: parsed.question_set.name,
        description: parsed.question_set.description,
        questions,
    })
}

/// Recursively load all `.toml` question set files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load one question set file, or every set under a directory.
pub fn load_question_sets(path: &Path) -> Result<Vec<QuestionSet>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![parse_question_set(path)?])
    }
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for common issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question set has no questions".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for q in &set.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &set.questions {
        if !(MIN_DIFFICULTY as i64..=MAX_DIFFICULTY as i64).contains(&q.difficulty) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!(
                    "difficulty {} is outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY} and will be clamped to {}",
                    q.difficulty,
                    q.clamped_difficulty()
                ),
            });
        }
    }

    for q in &set.questions {
        if let Some(w) = &q.score_weight {
            if w.base < 0.0 {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: format!("score_weight.base is negative ({})", w.base),
                });
            }
            if w.difficulty_bonus < 0.0 {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: format!(
                        "score_weight.difficulty_bonus is negative ({})",
                        w.difficulty_bonus
                    ),
                });
            }
        }
    }

    warnings
}
