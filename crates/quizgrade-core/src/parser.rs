//! Quiz file loading and validation.
//!
//! Loads quiz exports (JSON, camelCase as the platform writes them) and
//! checks them for problems the grader would silently work around.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{AnswerBoxType, Quiz};

/// Parse a quiz export file.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a quiz export from a string (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let quiz: Quiz = serde_json::from_str(content)
        .with_context(|| format!("failed to parse quiz JSON: {}", source_path.display()))?;
    tracing::debug!(
        "loaded quiz {} ({} rounds, {} teams) from {}",
        quiz.id,
        quiz.rounds.len(),
        quiz.teams.len(),
        source_path.display()
    );
    Ok(quiz)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The round ID (if applicable).
    pub round_id: Option<String>,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn round(round_id: &str, message: impl Into<String>) -> Self {
        Self {
            round_id: Some(round_id.to_string()),
            question_id: None,
            message: message.into(),
        }
    }

    fn question(round_id: &str, question_id: &str, message: impl Into<String>) -> Self {
        Self {
            round_id: Some(round_id.to_string()),
            question_id: Some(question_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a quiz for issues that degrade grading.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_rounds = HashSet::new();
    for round in &quiz.rounds {
        if !seen_rounds.insert(round.id.as_str()) {
            warnings.push(ValidationWarning::round(
                &round.id,
                format!("duplicate round ID: {}", round.id),
            ));
        }

        // Check for duplicate question IDs
        let mut seen_questions = HashSet::new();
        for question in &round.questions {
            if !seen_questions.insert(question.id.as_str()) {
                warnings.push(ValidationWarning::question(
                    &round.id,
                    &question.id,
                    format!("duplicate question ID: {}", question.id),
                ));
            }
        }

        // Check for stale ids in the question order
        for question_id in &round.question_order {
            if round.question(question_id).is_none() {
                warnings.push(ValidationWarning::question(
                    &round.id,
                    question_id,
                    "listed in questionOrder but has no template; it will be skipped",
                ));
            }
        }

        // Check for templates that are never asked
        for question in &round.questions {
            if !round.question_order.contains(&question.id) {
                warnings.push(ValidationWarning::question(
                    &round.id,
                    &question.id,
                    "not listed in questionOrder; it will not be graded",
                ));
            }
        }

        for question in &round.questions {
            if question.answer_type == AnswerBoxType::Unknown {
                warnings.push(ValidationWarning::question(
                    &round.id,
                    &question.id,
                    "unknown answerType; graded as input1",
                ));
            }
            if question
                .answer_type
                .layout()
                .live_slots(&question.answers)
                .is_empty()
            {
                warnings.push(ValidationWarning::question(
                    &round.id,
                    &question.id,
                    "answer key has no content in any graded slot",
                ));
            }
        }
    }

    // Check for submissions against rounds that do not exist
    for team in &quiz.teams {
        for answers in &team.live_quiz_round_answers {
            if quiz.round(&answers.round_id).is_none() {
                warnings.push(ValidationWarning {
                    round_id: Some(answers.round_id.clone()),
                    question_id: None,
                    message: format!("team {} submitted answers for an unknown round", team.id),
                });
            }
        }
    }

    warnings
}
