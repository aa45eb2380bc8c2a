//! Round grading.
//!
//! Grades every question of a round for one team: projects the team's
//! submission onto the round template, hands each question's live slots to
//! the [`AnswerMatcher`], and maps verdicts back to their key slots.

use std::collections::BTreeMap;

use crate::matcher::AnswerMatcher;
use crate::model::{GradedAnswerState, LiveQuizTeam, RoundGradeResult, RoundTemplate};
use crate::projector::{project_round, QuestionProjection};

/// Grades rounds with a fixed matcher configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundGrader {
    matcher: AnswerMatcher,
}

impl RoundGrader {
    pub fn new(matcher: AnswerMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &AnswerMatcher {
        &self.matcher
    }

    /// Grade `team`'s answers for `round`.
    ///
    /// Questions whose template is missing are skipped; the rest of the
    /// round is still graded.
    pub fn grade(&self, team: &LiveQuizTeam, round: &RoundTemplate) -> RoundGradeResult {
        let projection = project_round(round, team);
        if !projection.missing_questions.is_empty() {
            tracing::warn!(
                round = %round.id,
                team = %team.id,
                missing = ?projection.missing_questions,
                "question templates not found, skipping"
            );
        }

        let questions: BTreeMap<_, _> = projection
            .questions
            .iter()
            .map(|q| (q.position, self.grade_question(q)))
            .collect();

        RoundGradeResult::from_questions(questions)
    }

    /// Verdicts for one projected question, keyed by key slot.
    ///
    /// Only slots with key content receive a verdict.
    pub fn grade_question(&self, question: &QuestionProjection) -> GradedAnswerState {
        let live: Vec<_> = question.live_slots().collect();
        let correct: Vec<&str> = live.iter().map(|s| s.correct.as_str()).collect();
        let submitted: Vec<&str> = live.iter().map(|s| s.submitted.as_str()).collect();

        let verdicts = self
            .matcher
            .check_answers(&correct, &submitted, question.order_matters);

        live.iter().map(|s| s.key).zip(verdicts).collect()
    }

    /// Grade several teams for the same round, in the given order.
    pub fn grade_all<'a, I>(
        &self,
        teams: I,
        round: &RoundTemplate,
    ) -> Vec<(&'a LiveQuizTeam, RoundGradeResult)>
    where
        I: IntoIterator<Item = &'a LiveQuizTeam>,
    {
        teams
            .into_iter()
            .map(|team| (team, self.grade(team, round)))
            .collect()
    }
}

/// Grade one round for one team with the default configuration.
pub fn grade_answers_in_round(team: &LiveQuizTeam, round: &RoundTemplate) -> RoundGradeResult {
    RoundGrader::default().grade(team, round)
}
