//! Configuration error types.
//!
//! Grading itself never fails: malformed quiz data is recovered locally.
//! These errors cover the settings that steer classification, so a bad
//! cutoff is rejected before any team is graded.

use thiserror::Error;

/// Errors raised while building or validating grader settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cutoffs must satisfy `0 <= low < high <= 1`.
    #[error("invalid similarity cutoffs: high={high}, low={low} (need 0 <= low < high <= 1)")]
    InvalidThresholds { high: f64, low: f64 },

    /// The similarity metric name is not recognised.
    #[error("unknown similarity metric: {0}")]
    UnknownMetric(String),

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidOverride { var: String, value: String },
}
