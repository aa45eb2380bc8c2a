//! quizgrade-core: answer matching and round grading for live quizzes.
//!
//! This crate defines the quiz data model, the fuzzy answer matcher, and the
//! round grader that the quizgrade CLI builds on.

pub mod config;
pub mod error;
pub mod grader;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod projector;
pub mod report;
pub mod similarity;

pub use grader::{grade_answers_in_round, RoundGrader};
pub use matcher::{check_answers, AnswerMatcher, Thresholds};
