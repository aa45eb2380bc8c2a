//! Closeness scoring for free-text answers.
//!
//! Scores live in `[0, 1]`. Inputs that are identical once case-folded and
//! whitespace-normalized always score 1.0; an empty input against a
//! non-empty one always scores 0.0. Both metrics are symmetric.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How two answers are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// Sorensen-Dice coefficient over character bigrams, whitespace ignored.
    ///
    /// Bigrams keep their case, so a mis-capitalized leading letter costs
    /// a bigram. Case-only differences in otherwise equal answers are still
    /// caught by the normalized equality check.
    #[default]
    Dice,
    /// `1 - edit_distance / max_len` on case-folded, normalized text.
    Levenshtein,
}

impl SimilarityMetric {
    /// Score `a` against `b`.
    pub fn score(self, a: &str, b: &str) -> f64 {
        let (na, nb) = (normalize(a), normalize(b));
        if na == nb {
            return 1.0;
        }
        if na.is_empty() || nb.is_empty() {
            return 0.0;
        }
        match self {
            SimilarityMetric::Dice => dice_coefficient(a, b),
            SimilarityMetric::Levenshtein => levenshtein_similarity(&na, &nb),
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMetric::Dice => write!(f, "dice"),
            SimilarityMetric::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dice" | "bigram" => Ok(SimilarityMetric::Dice),
            "levenshtein" | "edit" | "edit_distance" => Ok(SimilarityMetric::Levenshtein),
            other => Err(ConfigError::UnknownMetric(other.to_string())),
        }
    }
}

/// Similarity with the default metric.
pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityMetric::default().score(a, b)
}

/// Case-fold, trim, and collapse internal whitespace runs to one space.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether the two answers are the same text after [`normalize`].
pub fn is_exact_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Levenshtein distance in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

fn dice_coefficient(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|c| !c.is_whitespace()).collect();
    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (a.len() - 1 + b.len() - 1) as f64
}
