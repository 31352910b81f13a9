//! The `testscore` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "testscore", version, about = "Assessment scoring and session timing engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an exported session against a question set
    Score {
        /// Path to .toml question set or directory
        #[arg(long)]
        questions: PathBuf,

        /// Path to an exported session snapshot (JSON)
        #[arg(long)]
        session: PathBuf,

        /// Scoring preset (standard, speed-focused, accuracy-focused,
        /// difficulty-focused, balanced-speed)
        #[arg(long)]
        preset: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate question set TOML files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// List the built-in scoring presets
    Presets,

    /// Check whether a set of scoring weights is normalized
    CheckConfig {
        /// Weight on response time
        #[arg(long = "time")]
        time_weight: f64,

        /// Weight on difficulty
        #[arg(long = "difficulty")]
        difficulty_weight: f64,

        /// Weight on accuracy
        #[arg(long = "accuracy")]
        accuracy_weight: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("testscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            questions,
            session,
            preset,
            config,
            format,
            output,
        } => commands::score::execute(questions, session, preset, config, format, output),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Presets => commands::presets::execute(),
        Commands::CheckConfig {
            time_weight,
            difficulty_weight,
            accuracy_weight,
        } => commands::check_config::execute(time_weight, difficulty_weight, accuracy_weight),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
