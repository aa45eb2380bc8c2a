//! Grade report types with JSON and markdown rendering.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grader::RoundGrader;
use crate::matcher::Thresholds;
use crate::model::{LiveQuizTeam, Quiz, RoundGradeResult, RoundTemplate, Verdict, VerdictCounts};
use crate::similarity::SimilarityMetric;

/// Grades of every selected team for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub quiz_id: String,
    pub quiz_name: String,
    pub round_id: String,
    pub round_title: String,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Cutoffs the grader ran with.
    pub thresholds: Thresholds,
    pub metric: SimilarityMetric,
    pub teams: Vec<TeamGrade>,
}

/// One team's graded round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGrade {
    pub team_id: String,
    pub team_name: String,
    pub result: RoundGradeResult,
    pub counts: VerdictCounts,
}

impl TeamGrade {
    pub fn new(team: &LiveQuizTeam, result: RoundGradeResult) -> Self {
        let counts = result.counts();
        Self {
            team_id: team.id.clone(),
            team_name: team.team_name.clone(),
            result,
            counts,
        }
    }

    /// Name to show for the team; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.team_name.trim().is_empty() {
            &self.team_id
        } else {
            &self.team_name
        }
    }
}

impl GradeReport {
    /// Grade `teams` for `round` and collect the results.
    pub fn build<'a, I>(quiz: &Quiz, round: &RoundTemplate, teams: I, grader: &RoundGrader) -> Self
    where
        I: IntoIterator<Item = &'a LiveQuizTeam>,
    {
        let teams = grader
            .grade_all(teams, round)
            .into_iter()
            .map(|(team, result)| TeamGrade::new(team, result))
            .collect();

        Self {
            quiz_id: quiz.id.clone(),
            quiz_name: quiz.name.clone(),
            round_id: round.id.clone(),
            round_title: round.title.clone(),
            created_at: Utc::now(),
            thresholds: grader.matcher().thresholds(),
            metric: grader.matcher().metric(),
            teams,
        }
    }

    /// Verdict counts summed over every team.
    pub fn totals(&self) -> VerdictCounts {
        let mut totals = VerdictCounts::default();
        for team in &self.teams {
            totals.correct += team.counts.correct;
            totals.incorrect += team.counts.incorrect;
            totals.uncertain += team.counts.uncertain;
        }
        totals
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize grade report")
    }

    /// Render the report as a markdown document.
    ///
    /// Uncertain slots are listed separately so a quizmaster can adjudicate
    /// them without reading the whole table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let title = if self.round_title.is_empty() {
            &self.round_id
        } else {
            &self.round_title
        };
        md.push_str(&format!("# {}: {}\n\n", md_escape(&self.quiz_name), md_escape(title)));
        md.push_str(&format!(
            "Graded {} with {} similarity (high {:.2}, low {:.2}).\n\n",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.metric,
            self.thresholds.high,
            self.thresholds.low
        ));

        md.push_str("| Team | Correct | Uncertain | Incorrect |\n");
        md.push_str("|------|---------|-----------|-----------|\n");
        for team in &self.teams {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                md_escape(team.display_name()),
                team.counts.correct,
                team.counts.uncertain,
                team.counts.incorrect
            ));
        }

        let needs_review: Vec<_> = self
            .teams
            .iter()
            .flat_map(|team| {
                team.result.iter().flat_map(move |(position, question)| {
                    question
                        .iter()
                        .filter(|(_, v)| **v == Verdict::Uncertain)
                        .map(move |(slot, _)| (team.display_name(), position, *slot))
                })
            })
            .collect();

        if !needs_review.is_empty() {
            md.push_str("\n## Needs review\n\n");
            for (team, position, slot) in needs_review {
                md.push_str(&format!("- {}: question {position}, {slot}\n", md_escape(team)));
            }
        }

        md
    }
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}
