use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A resolved configuration value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    /// Interprets raw text, e.g. from an environment variable.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            return ConfigValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return ConfigValue::Bool(false);
        }
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => ConfigValue::Number(number),
            _ => ConfigValue::Text(raw.to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::Text(_) => "string",
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Bool(value) => write!(f, "{}", value),
            ConfigValue::Number(value) => write!(f, "{}", value),
            ConfigValue::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

/// Named configuration values, already resolved before the pipeline runs.
pub type ConfigMap = HashMap<String, ConfigValue>;

/// Recognised configuration keys.
pub mod keys {
    pub const WEIGHT_ENVIRONMENTAL: &str = "esg.weights.environmental";
    pub const WEIGHT_SOCIAL: &str = "esg.weights.social";
    pub const WEIGHT_GOVERNANCE: &str = "esg.weights.governance";
    pub const QUALITY_THRESHOLD: &str = "validation.quality.threshold";
    pub const SCORE_MIN: &str = "validation.score.min";
    pub const SCORE_MAX: &str = "validation.score.max";
    pub const NORMALIZE_ENABLED: &str = "processing.normalize.enabled";
    pub const BATCH_SIZE: &str = "processing.batch.size";
    pub const PORTFOLIO_ID: &str = "pipeline.portfolio.id";
    pub const PORTFOLIO_NAME: &str = "pipeline.portfolio.name";
    pub const RETRY_MAX_ATTEMPTS: &str = "persistence.retry.max_attempts";
    pub const RETRY_BASE_DELAY_MS: &str = "persistence.retry.base_delay_ms";

    pub const ALL: [&str; 12] = [
        WEIGHT_ENVIRONMENTAL,
        WEIGHT_SOCIAL,
        WEIGHT_GOVERNANCE,
        QUALITY_THRESHOLD,
        SCORE_MIN,
        SCORE_MAX,
        NORMALIZE_ENABLED,
        BATCH_SIZE,
        PORTFOLIO_ID,
        PORTFOLIO_NAME,
        RETRY_MAX_ATTEMPTS,
        RETRY_BASE_DELAY_MS,
    ];
}
