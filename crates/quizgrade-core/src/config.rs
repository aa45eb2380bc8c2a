//! Grader configuration.
//!
//! Settings come from a TOML file and may be overridden from the
//! environment. Cutoffs are validated once at load time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grader::RoundGrader;
use crate::matcher::{AnswerMatcher, Thresholds};
use crate::similarity::SimilarityMetric;

/// Environment variable overriding the high cutoff.
pub const ENV_HIGH_CUTOFF: &str = "QUIZGRADE_HIGH_CUTOFF";
/// Environment variable overriding the low cutoff.
pub const ENV_LOW_CUTOFF: &str = "QUIZGRADE_LOW_CUTOFF";
/// Environment variable overriding the similarity metric.
pub const ENV_METRIC: &str = "QUIZGRADE_METRIC";

/// Top-level quizgrade configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Similarity cutoffs.
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Similarity metric.
    #[serde(default)]
    pub metric: SimilarityMetric,
}

impl GraderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()
    }

    pub fn matcher(&self) -> AnswerMatcher {
        AnswerMatcher::new(self.thresholds, self.metric)
    }

    pub fn grader(&self) -> RoundGrader {
        RoundGrader::new(self.matcher())
    }

    /// Replace whichever settings are given, then re-validate.
    pub fn with_overrides(
        mut self,
        high: Option<f64>,
        low: Option<f64>,
        metric: Option<SimilarityMetric>,
    ) -> Result<Self, ConfigError> {
        if let Some(high) = high {
            self.thresholds.high = high;
        }
        if let Some(low) = low {
            self.thresholds.low = low;
        }
        if let Some(metric) = metric {
            self.metric = metric;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizgrade.toml` in the current directory
/// 2. `~/.config/quizgrade/config.toml`
///
/// Environment variable overrides: `QUIZGRADE_HIGH_CUTOFF`,
/// `QUIZGRADE_LOW_CUTOFF`, `QUIZGRADE_METRIC`.
pub fn load_config() -> Result<GraderConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GraderConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading grader config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
                &path,
            )?
        }
        None => GraderConfig::default(),
    };

    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;
    Ok(config)
}

/// Parse a TOML config string (useful for testing).
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<GraderConfig> {
    let config: GraderConfig = toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config: {}", source_path.display()))?;
    Ok(config)
}

fn apply_env_overrides<F>(config: GraderConfig, lookup: F) -> Result<GraderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let cutoff = |var: &str| -> Result<Option<f64>, ConfigError> {
        lookup(var)
            .map(|value| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var: var.to_string(),
                        value,
                    })
            })
            .transpose()
    };

    let high = cutoff(ENV_HIGH_CUTOFF)?;
    let low = cutoff(ENV_LOW_CUTOFF)?;
    let metric = lookup(ENV_METRIC)
        .map(|m| m.parse::<SimilarityMetric>())
        .transpose()?;

    config.with_overrides(high, low, metric)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizgrade"))
}
