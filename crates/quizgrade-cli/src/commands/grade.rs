//! The `quizgrade grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};

use quizgrade_core::config::load_config_from;
use quizgrade_core::model::{LiveQuizTeam, Quiz, RoundTemplate, Verdict};
use quizgrade_core::parser::parse_quiz;
use quizgrade_core::projector::project_round;
use quizgrade_core::report::{GradeReport, TeamGrade};

use crate::OutputFormat;

pub fn execute(
    quiz_path: PathBuf,
    round_id: String,
    team_id: Option<String>,
    format: OutputFormat,
    config_path: Option<PathBuf>,
    high: Option<f64>,
    low: Option<f64>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?
        .with_overrides(high, low, None)
        .context("invalid cutoff override")?;
    let quiz = parse_quiz(&quiz_path)?;

    let round = quiz.round(&round_id).with_context(|| {
        let known: Vec<_> = quiz.rounds.iter().map(|r| r.id.as_str()).collect();
        format!("round not found: {round_id} (available: {})", known.join(", "))
    })?;

    let teams: Vec<&LiveQuizTeam> = match &team_id {
        Some(id) => vec![quiz
            .team(id)
            .with_context(|| format!("team not found: {id}"))?],
        None => quiz.teams.iter().collect(),
    };

    tracing::info!(
        "grading round {} for {} team(s) with {} similarity",
        round.id,
        teams.len(),
        config.metric
    );
    let report = GradeReport::build(&quiz, round, teams, &config.grader());

    match format {
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
        OutputFormat::Markdown => print!("{}", report.to_markdown()),
        OutputFormat::Text => print_text(&quiz, round, &report),
    }

    Ok(())
}

fn print_text(quiz: &Quiz, round: &RoundTemplate, report: &GradeReport) {
    if report.teams.is_empty() {
        println!("No teams to grade in round {}.", round.id);
        return;
    }

    for graded in &report.teams {
        println!("{} ({})", graded.display_name(), graded.team_id);
        if let Some(team) = quiz.team(&graded.team_id) {
            println!("{}", verdict_table(round, team, graded));
        }
        println!(
            "  {} correct, {} uncertain, {} incorrect\n",
            graded.counts.correct, graded.counts.uncertain, graded.counts.incorrect
        );
    }
}

fn verdict_table(round: &RoundTemplate, team: &LiveQuizTeam, graded: &TeamGrade) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Q", "Slot", "Answer", "Submitted", "Verdict"]);

    for question in project_round(round, team).questions {
        for slot in question.live_slots() {
            let verdict = graded.result.verdict(question.position, slot.key);
            table.add_row(vec![
                Cell::new(question.position),
                Cell::new(slot.key),
                Cell::new(&slot.correct),
                Cell::new(&slot.submitted),
                verdict_cell(verdict),
            ]);
        }
    }

    table
}

fn verdict_cell(verdict: Option<Verdict>) -> Cell {
    match verdict {
        Some(Verdict::Correct) => Cell::new("correct").fg(Color::Green),
        Some(Verdict::Uncertain) => Cell::new("uncertain").fg(Color::Yellow),
        Some(Verdict::Incorrect) => Cell::new("incorrect").fg(Color::Red),
        None => Cell::new("-"),
    }
}
