//! Answer-slot matching for a single question.
//!
//! Lines up a question's correct answers with a team's submitted answers and
//! classifies every key slot as correct, uncertain, or incorrect.
//!
//! When order matters, slots are compared by index. Otherwise the pairing is
//! the one-to-one assignment that maximizes total similarity, solved with the
//! Hungarian algorithm. Among equally good assignments the one keeping the
//! most submissions at their own index wins, so the outcome is stable for
//! any fixed input.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Verdict;
use crate::similarity::{normalize, SimilarityMetric};

/// Default score at or above which an answer is accepted.
pub const DEFAULT_HIGH_CUTOFF: f64 = 0.68;

/// Default score below which an answer is rejected outright.
pub const DEFAULT_LOW_CUTOFF: f64 = 0.40;

/// Resolution at which similarity totals are compared when choosing an assignment.
const SCORE_SCALE: f64 = 1e9;

/// The two similarity cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_high")]
    pub high: f64,
    #[serde(default = "default_low")]
    pub low: f64,
}

fn default_high() -> f64 {
    DEFAULT_HIGH_CUTOFF
}

fn default_low() -> f64 {
    DEFAULT_LOW_CUTOFF
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_CUTOFF,
            low: DEFAULT_LOW_CUTOFF,
        }
    }
}

impl Thresholds {
    pub fn new(high: f64, low: f64) -> Result<Self, ConfigError> {
        let thresholds = Self { high, low };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.high.is_finite()
            && self.low.is_finite()
            && 0.0 <= self.low
            && self.low < self.high
            && self.high <= 1.0;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidThresholds {
                high: self.high,
                low: self.low,
            })
        }
    }

    /// Classify a raw score.
    pub fn classify(&self, score: f64) -> Verdict {
        if score >= self.high {
            Verdict::Correct
        } else if score >= self.low {
            Verdict::Uncertain
        } else {
            Verdict::Incorrect
        }
    }
}

/// Outcome for one key slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotMatch {
    pub verdict: Verdict,
    /// Similarity between the key and the paired submission.
    pub score: f64,
    /// Index into the submitted list, `None` when paired with padding.
    pub submission: Option<usize>,
}

/// Classifies submitted answers against an answer key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnswerMatcher {
    thresholds: Thresholds,
    metric: SimilarityMetric,
}

impl AnswerMatcher {
    pub fn new(thresholds: Thresholds, metric: SimilarityMetric) -> Self {
        Self { thresholds, metric }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// One verdict per entry of `correct`, in `correct`'s order.
    pub fn check_answers<C, S>(
        &self,
        correct: &[C],
        submitted: &[S],
        order_matters: bool,
    ) -> Vec<Verdict>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        self.match_answers(correct, submitted, order_matters)
            .into_iter()
            .map(|m| m.verdict)
            .collect()
    }

    /// Like [`Self::check_answers`], keeping the score and the paired submission.
    pub fn match_answers<C, S>(
        &self,
        correct: &[C],
        submitted: &[S],
        order_matters: bool,
    ) -> Vec<SlotMatch>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        if correct.is_empty() {
            return Vec::new();
        }

        let keys: Vec<&str> = correct.iter().map(AsRef::as_ref).collect();
        let width = keys.len().max(submitted.len());
        let candidates: Vec<&str> = (0..width)
            .map(|j| submitted.get(j).map(AsRef::as_ref).unwrap_or(""))
            .collect();

        let pairing: Vec<usize> = if order_matters {
            (0..keys.len()).collect()
        } else {
            let scores: Vec<Vec<f64>> = keys
                .iter()
                .map(|k| candidates.iter().map(|s| self.metric.score(k, s)).collect())
                .collect();
            best_assignment(&scores)
        };

        keys.iter()
            .zip(pairing)
            .map(|(key, j)| {
                let candidate = candidates[j];
                let score = self.metric.score(key, candidate);
                SlotMatch {
                    verdict: self.verdict(key, candidate, score),
                    score,
                    submission: (j < submitted.len()).then_some(j),
                }
            })
            .collect()
    }

    fn verdict(&self, key: &str, submission: &str, score: f64) -> Verdict {
        let (key, submission) = (normalize(key), normalize(submission));
        if key == submission {
            return Verdict::Correct;
        }
        if key.is_empty() || submission.is_empty() {
            return Verdict::Incorrect;
        }
        self.thresholds.classify(score)
    }
}

/// Grade one question with the default cutoffs and metric.
pub fn check_answers<C, S>(correct: &[C], submitted: &[S], order_matters: bool) -> Vec<Verdict>
where
    C: AsRef<str>,
    S: AsRef<str>,
{
    AnswerMatcher::default().check_answers(correct, submitted, order_matters)
}

/// Column chosen for each row of `scores` (rows <= columns), maximizing the
/// total score and, among optimal choices, the number of `row == column` pairs.
fn best_assignment(scores: &[Vec<f64>]) -> Vec<usize> {
    let rows = scores.len();
    // Every total of diagonal bonuses stays below one quantum of score.
    let bonus_base = rows as i64 + 1;
    let weights: Vec<Vec<i64>> = scores
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, s)| {
                    let quanta = (s * SCORE_SCALE).round() as i64;
                    quanta * bonus_base + i64::from(i == j)
                })
                .collect()
        })
        .collect();
    hungarian_max(&weights)
}

/// Maximum-weight assignment of rows to distinct columns (rows <= columns).
///
/// Potential-based O(n^2 m) Hungarian algorithm over integer weights.
fn hungarian_max(weights: &[Vec<i64>]) -> Vec<usize> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    let m = weights[0].len();
    debug_assert!(m >= n, "more rows than columns");

    const INF: i64 = i64::MAX / 4;
    // 1-based rows and columns; column 0 and row 0 are sentinels.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut owner = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut j0 = 0usize;
        let mut min_slack = vec![INF; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let reduced = -weights[i0 - 1][j - 1] - u[i0] - v[j];
                if reduced < min_slack[j] {
                    min_slack[j] = reduced;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=m {
        if owner[j] != 0 {
            assignment[owner[j] - 1] = j - 1;
        }
    }
    assignment
}
