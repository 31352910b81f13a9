//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn testscore() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("testscore").unwrap()
}

const QUESTIONS: &str = r#"
[question_set]
id = "demo"
name = "Demo Quiz"

[[questions]]
id = "q1"
correct_answer = "a"
difficulty = 1

[[questions]]
id = "q2"
correct_answer = "b"
difficulty = 3

[[questions]]
id = "q3"
correct_answer = "c"
difficulty = 4
"#;

/// q1 and q2 answered correctly in 10s and 35s, q3 left unanswered.
const SESSION: &str = r#"{
    "answers": {
        "q1": { "answer": "a", "answeredAtTimestamp": 10000, "timeTakenSeconds": 10 },
        "q2": { "answer": "b", "answeredAtTimestamp": 45000, "timeTakenSeconds": 35 }
    },
    "timings": {
        "q1": { "startTime": 0, "endTime": 10000, "durationSeconds": 10 },
        "q2": { "startTime": 10000, "endTime": 45000, "durationSeconds": 35 }
    },
    "testStartTime": 0,
    "config": { "timeWeight": 0.3, "difficultyWeight": 0.5, "accuracyWeight": 0.2 }
}"#;

fn fixtures() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let questions = dir.path().join("questions.toml");
    let session = dir.path().join("session.json");
    std::fs::write(&questions, QUESTIONS).unwrap();
    std::fs::write(&session, SESSION).unwrap();
    (dir, questions, session)
}

fn score_json(extra: &[&str]) -> serde_json::Value {
    let (dir, questions, session) = fixtures();
    let output = testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("json")
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn score_json_output() {
    let report = score_json(&[]);
    assert_eq!(report["grade"], "D");
    assert_eq!(report["summary"]["totalScore"], 3);
    assert_eq!(report["summary"]["maxPossibleScore"], 5);
    assert_eq!(report["summary"]["percentage"], 60);
    assert_eq!(report["summary"]["correctAnswers"], 2);
    assert_eq!(report["summary"]["totalQuestions"], 3);
    assert_eq!(report["answeredQuestions"], 2);
    assert_eq!(report["completionRate"], 67);
    assert_eq!(report["testDuration"], 45);
    assert!(!report["recommendations"].as_array().unwrap().is_empty());
}

#[test]
fn score_with_preset_overrides_session_config() {
    let report = score_json(&["--preset", "accuracy-focused"]);
    assert_eq!(report["summary"]["totalScore"], 7);
}

#[test]
fn score_with_config_file() {
    let (dir, questions, session) = fixtures();
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        "[scoring]\ntime_weight = 0.2\ndifficulty_weight = 0.3\naccuracy_weight = 0.5\n",
    )
    .unwrap();

    let output = testscore()
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["totalScore"], 7);
}

#[test]
fn score_text_output() {
    let (dir, questions, session) = fixtures();
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade: D (Average)"))
        .stdout(predicate::str::contains("Recommendations:"));
}

#[test]
fn score_markdown_to_file() {
    let (dir, questions, session) = fixtures();
    let out = dir.path().join("out").join("report.md");
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("markdown")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let md = std::fs::read_to_string(&out).unwrap();
    assert!(md.contains("**Grade:** D"));
    assert!(md.contains("| Completion | 67% |"));
}

#[test]
fn score_html_to_file() {
    let (dir, questions, session) = fixtures();
    let out = dir.path().join("report.html");
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Level 3"));
}

#[test]
fn score_output_under_a_file_fails_with_context() {
    let (dir, questions, session) = fixtures();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("markdown")
        .arg("--output")
        .arg(blocker.join("sub").join("report.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create directory"));
}

#[test]
fn score_directory_counts_repeated_ids_once() {
    let (dir, _questions, session) = fixtures();
    let sets = dir.path().join("sets");
    std::fs::create_dir(&sets).unwrap();
    std::fs::write(sets.join("a.toml"), QUESTIONS).unwrap();
    std::fs::write(sets.join("b.toml"), QUESTIONS).unwrap();

    let output = testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&sets)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["totalQuestions"], 3);
    assert_eq!(report["summary"]["totalScore"], 3);
    assert_eq!(report["answeredQuestions"], 2);
}

#[test]
fn score_invalid_session() {
    let (dir, questions, _session) = fixtures();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    testscore()
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_unknown_format() {
    let (dir, questions, session) = fixtures();
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--format")
        .arg("pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn score_unknown_preset() {
    let (dir, questions, session) = fixtures();
    testscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--questions")
        .arg(&questions)
        .arg("--session")
        .arg(&session)
        .arg("--preset")
        .arg("turbo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scoring preset"));
}

#[test]
fn validate_valid_question_set() {
    let (_dir, questions, _session) = fixtures();
    testscore()
        .arg("validate")
        .arg("--questions")
        .arg(&questions)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("All question sets valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.toml");
    std::fs::write(
        &path,
        r#"
[question_set]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
correct_answer = "a"
difficulty = 7

[[questions]]
id = "same"
correct_answer = "b"
"#,
    )
    .unwrap();

    testscore()
        .arg("validate")
        .arg("--questions")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate question ID"))
        .stdout(predicate::str::contains("will be clamped"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    testscore()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn presets_lists_all() {
    testscore()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("standard"))
        .stdout(predicate::str::contains("speed-focused"))
        .stdout(predicate::str::contains("accuracy-focused"))
        .stdout(predicate::str::contains("difficulty-focused"))
        .stdout(predicate::str::contains("balanced-speed"));
}

#[test]
fn check_config_valid() {
    testscore()
        .args(["check-config", "--time", "0.3", "--difficulty", "0.5", "--accuracy", "0.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum of weights: 1.000"))
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn check_config_not_normalized_still_succeeds() {
    testscore()
        .args(["check-config", "--time", "0.5", "--difficulty", "0.5", "--accuracy", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum of weights: 1.500"))
        .stdout(predicate::str::contains("not normalized"));
}

#[test]
fn help_output() {
    testscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessment scoring and session timing engine"));
}

#[test]
fn version_output() {
    testscore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("testscore"));
}
