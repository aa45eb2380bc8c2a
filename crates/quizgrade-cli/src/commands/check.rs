//! The `quizgrade check` command.

use std::path::PathBuf;

use anyhow::Result;

use quizgrade_core::config::load_config_from;

pub fn execute(
    correct: String,
    submitted: String,
    order_matters: bool,
    delimiter: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if delimiter.is_empty() {
        anyhow::bail!("--delimiter must not be empty");
    }

    let config = load_config_from(config_path.as_deref())?;
    let (keys, answers) = live_pairs(
        &split_answers(&correct, &delimiter),
        &split_answers(&submitted, &delimiter),
        order_matters,
    );

    let matches = config
        .matcher()
        .match_answers(&keys, &answers, order_matters);

    for (key, m) in keys.iter().zip(&matches) {
        let submission = m.submission.map(|j| answers[j]).unwrap_or("");
        println!(
            "{key} -> {}: {} ({:.2})",
            if submission.is_empty() { "(blank)" } else { submission },
            m.verdict,
            m.score
        );
    }

    Ok(())
}

fn split_answers<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    raw.split(delimiter).map(str::trim).collect()
}

/// Drop blank keys. When order matters each kept key stays paired with the
/// submission at its original position.
fn live_pairs<'a>(
    keys: &[&'a str],
    answers: &[&'a str],
    order_matters: bool,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let live: Vec<usize> = (0..keys.len())
        .filter(|&i| !keys[i].is_empty())
        .collect();
    let live_keys = live.iter().map(|&i| keys[i]).collect();
    let live_answers = if order_matters {
        live.iter()
            .map(|&i| answers.get(i).copied().unwrap_or(""))
            .collect()
    } else {
        answers.to_vec()
    };
    (live_keys, live_answers)
}
