//! The `quizgrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizgrade.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("quizzes").context("failed to create quizzes/")?;
    write_if_missing(Path::new("quizzes/example.json"), EXAMPLE_QUIZ)?;

    println!("\nNext steps:");
    println!("  1. Tune the cutoffs in quizgrade.toml");
    println!("  2. Run: quizgrade validate --quiz quizzes/example.json");
    println!("  3. Run: quizgrade grade --quiz quizzes/example.json --round round-1");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizgrade configuration

# Similarity metric: "dice" (bigram overlap) or "levenshtein" (edit distance)
metric = "dice"

[thresholds]
# Scores at or above `high` are accepted, below `low` rejected,
# anything in between is flagged for the quizmaster.
high = 0.68
low = 0.40
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "id": "example",
  "name": "Example Quiz",
  "rounds": [
    {
      "id": "round-1",
      "title": "Pop Culture",
      "description": "A short round to get started",
      "questionOrder": ["best-picture", "alanis", "beatles", "planets"],
      "questions": [
        {
          "id": "best-picture",
          "text": "Which film won Best Picture at the 2024 Oscars?",
          "answers": {"answer1": "Oppenheimer"},
          "answerType": "input1",
          "orderMatters": false,
          "isBonus": false
        },
        {
          "id": "alanis",
          "text": "Name the singer and the song: 'Isn't it ...'",
          "answers": {"answer1": "Alanis Morissette", "answer2": "Ironic"},
          "answerType": "input2",
          "orderMatters": false,
          "isBonus": false
        },
        {
          "id": "beatles",
          "text": "Name the Beatles in order of birth",
          "answers": {"answer1": "Ringo", "answer2": "John", "answer3": "Paul", "answer4": "George"},
          "answerType": "input4",
          "orderMatters": true,
          "isBonus": true
        },
        {
          "id": "planets",
          "text": "Name any two rocky planets",
          "answers": {"answer1": "Mercury", "answer2": "Venus", "answer3": "Earth", "answer4": "Mars"},
          "answerType": "input2_list",
          "orderMatters": false,
          "isBonus": false
        }
      ]
    }
  ],
  "teams": [
    {
      "id": "team-1",
      "teamName": "Quiz Team Aguilera",
      "liveQuizRoundAnswers": [
        {
          "roundId": "round-1",
          "answers": {
            "1": {"answer1": "Oppenheimer"},
            "2": {"answer1": "Ironic", "answer2": "Alanis Morisette"},
            "3": {"answer1": "Ringo", "answer2": "John", "answer3": "Paul", "answer4": "George"},
            "4": {"answer1": "Mars", "answer2": "Venus"}
          },
          "didJoker": true
        }
      ]
    },
    {
      "id": "team-2",
      "teamName": "Les Quizerables",
      "liveQuizRoundAnswers": [
        {
          "roundId": "round-1",
          "answers": {
            "1": {"answer1": "openhimer"},
            "2": {"answer1": "Atlantis Moriset", "answer2": "iron"},
            "3": {"answer1": "John", "answer2": "Paul", "answer3": "George", "answer4": "Ringo"},
            "4": {"answer1": "Pluto"}
          }
        }
      ]
    }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizgrade_core::config::parse_config_str;
    use quizgrade_core::parser::{parse_quiz_str, validate_quiz};

    #[test]
    fn sample_config_parses() {
        let config = parse_config_str(SAMPLE_CONFIG, Path::new("quizgrade.toml")).unwrap();
        assert_eq!(config, quizgrade_core::config::GraderConfig::default());
    }

    #[test]
    fn example_quiz_is_valid() {
        let quiz = parse_quiz_str(EXAMPLE_QUIZ, Path::new("example.json")).unwrap();
        assert_eq!(quiz.teams.len(), 2);
        assert!(validate_quiz(&quiz).is_empty());
    }
}
