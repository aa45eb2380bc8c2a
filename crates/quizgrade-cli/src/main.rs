//! quizgrade CLI: grade live quiz rounds from exported quiz files.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizgrade", version, about = "Fuzzy auto-grading for live trivia quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for grade results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one round for every team (or a single team)
    Grade {
        /// Path to the exported quiz JSON
        #[arg(long)]
        quiz: PathBuf,

        /// Round id to grade
        #[arg(long)]
        round: String,

        /// Only grade this team id
        #[arg(long)]
        team: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the high similarity cutoff
        #[arg(long)]
        high: Option<f64>,

        /// Override the low similarity cutoff
        #[arg(long)]
        low: Option<f64>,
    },

    /// Grade a single ad hoc question
    Check {
        /// Correct answers, separated by the delimiter
        #[arg(long)]
        correct: String,

        /// Submitted answers, separated by the delimiter
        #[arg(long)]
        submitted: String,

        /// Compare answers slot by slot
        #[arg(long)]
        order_matters: bool,

        /// Separator between answers
        #[arg(long, default_value = ",")]
        delimiter: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a quiz file for problems that affect grading
    Validate {
        /// Path to the exported quiz JSON
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create a starter config and example quiz
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizgrade=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            quiz,
            round,
            team,
            format,
            config,
            high,
            low,
        } => commands::grade::execute(quiz, round, team, format, config, high, low),
        Commands::Check {
            correct,
            submitted,
            order_matters,
            delimiter,
            config,
        } => commands::check::execute(correct, submitted, order_matters, delimiter, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
