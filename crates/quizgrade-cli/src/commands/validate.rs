//! The `quizgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizgrade_core::parser::{parse_quiz, validate_quiz};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quiz = parse_quiz(&quiz_path)?;

    let questions: usize = quiz.rounds.iter().map(|r| r.questions.len()).sum();
    println!(
        "Quiz: {} ({} rounds, {} questions, {} teams)",
        if quiz.name.is_empty() { &quiz.id } else { &quiz.name },
        quiz.rounds.len(),
        questions,
        quiz.teams.len()
    );

    let warnings = validate_quiz(&quiz);
    for w in &warnings {
        let prefix = match (&w.round_id, &w.question_id) {
            (Some(round), Some(question)) => format!("  [{round}/{question}]"),
            (Some(round), None) => format!("  [{round}]"),
            _ => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
