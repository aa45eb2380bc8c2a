//! End-to-end tests: quiz JSON through projection, grading, and reporting.

use std::path::Path;

use quizgrade_core::config::GraderConfig;
use quizgrade_core::model::{SlotKey, Verdict};
use quizgrade_core::parser::{parse_quiz_str, validate_quiz};
use quizgrade_core::projector::round_answer_arrays;
use quizgrade_core::report::GradeReport;
use quizgrade_core::{check_answers, grade_answers_in_round};

const QUIZ: &str = r#"{
  "id": "friday",
  "name": "Friday Quiz",
  "rounds": [{
    "id": "snl",
    "title": "Saturday Night Live",
    "questionOrder": ["cast", "retired-question", "genre"],
    "questions": [
      {
        "id": "cast",
        "answers": {"answer1": "Pete Davidson", "answer2": "Ariana Grande", "answer3": "SNL", "answer4": "Jazz Music"},
        "answerType": "input4",
        "orderMatters": true
      },
      {
        "id": "genre",
        "answers": {"answer1": "Jazz"},
        "answerType": "radio3"
      }
    ]
  }],
  "teams": [{
    "id": "t1",
    "teamName": "Trivia Newton John",
    "liveQuizRoundAnswers": [{
      "roundId": "snl",
      "answers": {
        "1": {"answer1": "Peter Davids", "answer2": "Marina Grand", "answer3": "SAT", "answer4": "Blues"},
        "2": {"answer1": "not graded"},
        "3": {"answer1": "jazz", "answer2": 7}
      }
    }]
  }]
}"#;

#[test]
fn full_round_pipeline() {
    let quiz = parse_quiz_str(QUIZ, Path::new("friday.json")).unwrap();
    let round = quiz.round("snl").unwrap();
    let team = quiz.team("t1").unwrap();

    let warnings = validate_quiz(&quiz);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].question_id.as_deref(), Some("retired-question"));

    let arrays = round_answer_arrays(round, team);
    assert_eq!(
        arrays.answers,
        vec!["Pete Davidson | Ariana Grande | SNL | Jazz Music", "Jazz"]
    );
    assert_eq!(arrays.team_answers[1], "jazz");
    assert_eq!(arrays.order_matters, vec![true, false]);

    let result = grade_answers_in_round(team, round);
    assert_eq!(result.len(), 2);
    let cast = result.question(1).unwrap();
    assert_eq!(
        cast.values().copied().collect::<Vec<_>>(),
        vec![
            Verdict::Correct,
            Verdict::Uncertain,
            Verdict::Incorrect,
            Verdict::Incorrect
        ]
    );
    assert!(result.question(2).is_none());
    assert_eq!(result.verdict(3, SlotKey(1)), Some(Verdict::Correct));

    let report = GradeReport::build(&quiz, round, &quiz.teams, &GraderConfig::default().grader());
    assert_eq!(report.teams[0].counts.total(), 5);
    assert!(report.to_markdown().contains("Trivia Newton John: question 1, answer2"));
}

#[test]
fn public_check_answers_matches_documented_cases() {
    assert_eq!(
        check_answers(&["Oppenheimer"], &["openhimer"], false),
        vec![Verdict::Uncertain]
    );
    assert_eq!(
        check_answers(
            &["Alanis Morissette", "Ironic"],
            &["iron", "Atlantis Moriset"],
            false
        ),
        vec![Verdict::Correct, Verdict::Uncertain]
    );
    assert_eq!(
        check_answers(
            &["Alanis Morissette", "Ironic"],
            &["iron", "Atlantis Moriset"],
            true
        ),
        vec![Verdict::Incorrect, Verdict::Incorrect]
    );
}
