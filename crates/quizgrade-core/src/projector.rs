//! Answer-array projection.
//!
//! Turns a round template plus one team's submission into per-question slot
//! lists, and flattens those into the three parallel arrays (key texts,
//! team texts, order flags) used by the grader and by answer exports.

use serde::Serialize;

use crate::model::{
    AnswerState, LiveQuizTeam, RoundTemplate, SlotKey, SlotLayout, ANSWER_DELIMITER,
};

/// One slot of a question: the key text and what the team put there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedSlot {
    pub key: SlotKey,
    pub correct: String,
    pub submitted: String,
}

/// A question's slots, ready for matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionProjection {
    /// 1-based position of the question in the round's question order.
    pub position: usize,
    pub question_id: String,
    pub layout: SlotLayout,
    /// Order flag after applying the layout's rules.
    pub order_matters: bool,
    pub slots: Vec<ProjectedSlot>,
}

impl QuestionProjection {
    /// Slots whose key has content.
    pub fn live_slots(&self) -> impl Iterator<Item = &ProjectedSlot> {
        self.slots.iter().filter(|s| !s.correct.trim().is_empty())
    }

    pub fn joined_answers(&self) -> String {
        join(self.slots.iter().map(|s| s.correct.as_str()))
    }

    pub fn joined_team_answers(&self) -> String {
        join(self.slots.iter().map(|s| s.submitted.as_str()))
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(ANSWER_DELIMITER)
}

/// Projection of one round for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundProjection {
    pub round_id: String,
    pub questions: Vec<QuestionProjection>,
    /// Question ids in the order list that have no template.
    pub missing_questions: Vec<String>,
}

/// The three parallel per-question arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerArrays {
    /// Key texts per question, slots joined with [`ANSWER_DELIMITER`].
    pub answers: Vec<String>,
    /// Team texts per question, joined the same way.
    pub team_answers: Vec<String>,
    pub order_matters: Vec<bool>,
}

impl RoundProjection {
    pub fn arrays(&self) -> AnswerArrays {
        let mut arrays = AnswerArrays::default();
        for q in &self.questions {
            arrays.answers.push(q.joined_answers());
            arrays.team_answers.push(q.joined_team_answers());
            arrays.order_matters.push(q.order_matters);
        }
        arrays
    }
}

/// Project `team`'s submission for `round`.
///
/// Question ids without a template are skipped; positions of the remaining
/// questions still count them, matching how submissions are keyed.
pub fn project_round(round: &RoundTemplate, team: &LiveQuizTeam) -> RoundProjection {
    let empty = AnswerState::default();
    let round_answers = team.round_answers(&round.id);

    let mut questions = Vec::with_capacity(round.question_order.len());
    let mut missing_questions = Vec::new();

    for (index, question_id) in round.question_order.iter().enumerate() {
        let position = index + 1;
        let Some(question) = round.question(question_id) else {
            tracing::debug!(
                "round {}: no template for question {question_id}, skipping",
                round.id
            );
            missing_questions.push(question_id.clone());
            continue;
        };

        let submitted = round_answers
            .and_then(|a| a.for_position(position))
            .unwrap_or(&empty);
        let layout = question.answer_type.layout();

        let slots = layout
            .slots(&question.answers)
            .into_iter()
            .map(|key| ProjectedSlot {
                key,
                correct: question.answers.answer(key).to_string(),
                submitted: submitted.answer(key).to_string(),
            })
            .collect();

        questions.push(QuestionProjection {
            position,
            question_id: question_id.clone(),
            layout,
            order_matters: layout.effective_order(question.order_matters),
            slots,
        });
    }

    RoundProjection {
        round_id: round.id.clone(),
        questions,
        missing_questions,
    }
}

/// Shorthand for `project_round(round, team).arrays()`.
pub fn round_answer_arrays(round: &RoundTemplate, team: &LiveQuizTeam) -> AnswerArrays {
    project_round(round, team).arrays()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerBoxType, QuestionTemplate, RoundAnswers};
    use std::collections::BTreeMap;

    fn question(
        id: &str,
        answer_type: AnswerBoxType,
        answers: &[&str],
        order: bool,
    ) -> QuestionTemplate {
        QuestionTemplate {
            id: id.into(),
            text: format!("Question {id}"),
            answers: AnswerState::from_answers(answers.iter().copied()),
            answer_type,
            order_matters: order,
            is_bonus: false,
            notes: None,
        }
    }

    fn team(round_id: &str, answers: &[(usize, &[&str])]) -> LiveQuizTeam {
        let answers: BTreeMap<String, AnswerState> = answers
            .iter()
            .map(|(pos, a)| (pos.to_string(), AnswerState::from_answers(a.iter().copied())))
            .collect();
        LiveQuizTeam {
            id: "team-1".into(),
            team_name: "The Know-It-Owls".into(),
            live_quiz_round_answers: vec![RoundAnswers {
                round_id: round_id.into(),
                answers,
                did_joker: false,
            }],
        }
    }

    fn round(order: &[&str], questions: Vec<QuestionTemplate>) -> RoundTemplate {
        RoundTemplate {
            id: "round-1".into(),
            title: "Round 1".into(),
            description: String::new(),
            question_order: order.iter().map(|s| s.to_string()).collect(),
            questions,
        }
    }

    #[test]
    fn fixed_questions_keep_every_slot() {
        let r = round(
            &["q1"],
            vec![question("q1", AnswerBoxType::Input3, &["Red", "", "Blue"], true)],
        );
        let t = team("round-1", &[(1, &["red", "green"])]);

        let arrays = round_answer_arrays(&r, &t);
        assert_eq!(arrays.answers, vec!["Red |  | Blue"]);
        assert_eq!(arrays.team_answers, vec!["red | green | "]);
        assert_eq!(arrays.order_matters, vec![true]);

        let projection = project_round(&r, &t);
        let live: Vec<_> = projection.questions[0].live_slots().map(|s| s.key).collect();
        assert_eq!(live, vec![SlotKey(1), SlotKey(3)]);
    }

    #[test]
    fn list_questions_use_key_bearing_pool_slots_and_ignore_order() {
        let r = round(
            &["q1"],
            vec![question(
                "q1",
                AnswerBoxType::Input2List,
                &["Mercury", "Venus", "", "Mars"],
                true,
            )],
        );
        let t = team("round-1", &[(1, &["Mars", "Venus"])]);

        let projection = project_round(&r, &t);
        let q = &projection.questions[0];
        assert_eq!(q.layout, SlotLayout::Pool { slots: 8 });
        assert!(!q.order_matters);
        let keys: Vec<_> = q.slots.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![SlotKey(1), SlotKey(2), SlotKey(4)]);
        assert_eq!(q.joined_answers(), "Mercury | Venus | Mars");
        assert_eq!(q.joined_team_answers(), "Mars | Venus | ");
    }

    #[test]
    fn stale_question_ids_are_skipped_without_breaking_alignment() {
        let r = round(
            &["q1", "gone", "q3"],
            vec![
                question("q1", AnswerBoxType::Input1, &["Paris"], false),
                question("q3", AnswerBoxType::Input1, &["Rome"], true),
            ],
        );
        let t = team("round-1", &[(1, &["Paris"]), (2, &["ignored"]), (3, &["Rome"])]);

        let projection = project_round(&r, &t);
        assert_eq!(projection.missing_questions, vec!["gone"]);
        let positions: Vec<_> = projection.questions.iter().map(|q| q.position).collect();
        assert_eq!(positions, vec![1, 3]);

        let arrays = projection.arrays();
        assert_eq!(arrays.answers, vec!["Paris", "Rome"]);
        assert_eq!(arrays.team_answers, vec!["Paris", "Rome"]);
        assert_eq!(arrays.order_matters, vec![false, true]);
    }

    #[test]
    fn team_without_round_answers_projects_blanks() {
        let r = round(&["q1"], vec![question("q1", AnswerBoxType::Input2, &["A", "B"], false)]);
        let t = team("another-round", &[(1, &["A", "B"])]);
        let arrays = round_answer_arrays(&r, &t);
        assert_eq!(arrays.team_answers, vec![" | "]);
    }

    #[test]
    fn empty_round_projects_nothing() {
        let r = round(&[], vec![]);
        let t = team("round-1", &[]);
        let arrays = round_answer_arrays(&r, &t);
        assert!(arrays.answers.is_empty());
        assert!(arrays.team_answers.is_empty());
        assert!(arrays.order_matters.is_empty());
    }
}
