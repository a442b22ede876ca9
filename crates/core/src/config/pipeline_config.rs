//! Typed pipeline settings read from a [`ConfigMap`].

use std::time::Duration;

use log::debug;
use serde::Serialize;

use super::config_model::{keys, ConfigMap, ConfigValue};
use crate::constants::{
    DEFAULT_ENVIRONMENTAL_WEIGHT, DEFAULT_GOVERNANCE_WEIGHT, DEFAULT_PORTFOLIO_ID,
    DEFAULT_PORTFOLIO_NAME, DEFAULT_SOCIAL_WEIGHT, MAX_SCORE, MIN_SCORE,
};
use crate::errors::{Error, Result};
use crate::holdings::ScoreBounds;
use crate::scoring::EsgWeights;
use crate::transaction::{RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};

pub const DEFAULT_QUALITY_THRESHOLD: f64 = 85.0;
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Settings for one pipeline instance.
///
/// Built once and handed to each stage at construction; stages never look
/// configuration up on their own.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub weights: EsgWeights,
    pub score_bounds: ScoreBounds,
    /// Minimum quality score, in percent, for a report to pass the gate.
    ///
    /// A configured value below 1.0 is read as a fraction and scaled by 100;
    /// 1.0 and above are taken as percentages, so 1.0 means 1%.
    pub quality_threshold: f64,
    pub normalize_before_scoring: bool,
    pub batch_size: usize,
    pub portfolio_id: String,
    pub portfolio_name: String,
    pub retry: RetryPolicy,
}

impl PipelineConfig {
    /// Reads every known key, falling back to its default when absent.
    /// Unknown keys are ignored.
    pub fn from_map(map: &ConfigMap) -> Result<Self> {
        let weights = EsgWeights::new(
            number(map, keys::WEIGHT_ENVIRONMENTAL, DEFAULT_ENVIRONMENTAL_WEIGHT)?,
            number(map, keys::WEIGHT_SOCIAL, DEFAULT_SOCIAL_WEIGHT)?,
            number(map, keys::WEIGHT_GOVERNANCE, DEFAULT_GOVERNANCE_WEIGHT)?,
        )?;

        let score_bounds = ScoreBounds::new(
            number(map, keys::SCORE_MIN, MIN_SCORE)?,
            number(map, keys::SCORE_MAX, MAX_SCORE)?,
        );
        if score_bounds.min >= score_bounds.max {
            return Err(Error::InvalidConfigValue(format!(
                "{} ({}) must be below {} ({})",
                keys::SCORE_MIN,
                score_bounds.min,
                keys::SCORE_MAX,
                score_bounds.max
            )));
        }

        let mut quality_threshold =
            number(map, keys::QUALITY_THRESHOLD, DEFAULT_QUALITY_THRESHOLD)?;
        // values below 1.0 are fractions, e.g. 0.85 is 85%
        if quality_threshold < 1.0 {
            quality_threshold *= 100.0;
        }
        if !(0.0..=100.0).contains(&quality_threshold) {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be between 0 and 100, got {}",
                keys::QUALITY_THRESHOLD,
                quality_threshold
            )));
        }

        let batch_size = count(map, keys::BATCH_SIZE, DEFAULT_BATCH_SIZE as u64)? as usize;
        if batch_size == 0 {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be at least 1",
                keys::BATCH_SIZE
            )));
        }

        let max_attempts = count(map, keys::RETRY_MAX_ATTEMPTS, DEFAULT_MAX_ATTEMPTS as u64)?;
        let max_attempts = u32::try_from(max_attempts).map_err(|_| {
            Error::InvalidConfigValue(format!("{} is too large", keys::RETRY_MAX_ATTEMPTS))
        })?;
        let base_delay_ms = count(map, keys::RETRY_BASE_DELAY_MS, DEFAULT_BASE_DELAY_MS)?;

        let config = Self {
            weights,
            score_bounds,
            quality_threshold,
            normalize_before_scoring: boolean(map, keys::NORMALIZE_ENABLED, false)?,
            batch_size,
            portfolio_id: text(map, keys::PORTFOLIO_ID, DEFAULT_PORTFOLIO_ID)?,
            portfolio_name: text(map, keys::PORTFOLIO_NAME, DEFAULT_PORTFOLIO_NAME)?,
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(base_delay_ms)),
        };
        debug!("Pipeline configuration resolved: {:?}", config);
        Ok(config)
    }

    pub fn passes_quality_gate(&self, quality_score: f64) -> bool {
        quality_score >= self.quality_threshold
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            weights: EsgWeights::default(),
            score_bounds: ScoreBounds::default(),
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            normalize_before_scoring: false,
            batch_size: DEFAULT_BATCH_SIZE,
            portfolio_id: DEFAULT_PORTFOLIO_ID.to_string(),
            portfolio_name: DEFAULT_PORTFOLIO_NAME.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

fn wrong_type(key: &str, expected: &str, value: &ConfigValue) -> Error {
    Error::InvalidConfigValue(format!(
        "{} must be a {}, got {} '{}'",
        key,
        expected,
        value.type_name(),
        value
    ))
}

fn number(map: &ConfigMap, key: &str, default: f64) -> Result<f64> {
    match map.get(key) {
        None => Ok(default),
        Some(ConfigValue::Number(value)) if value.is_finite() => Ok(*value),
        Some(other) => Err(wrong_type(key, "number", other)),
    }
}

fn count(map: &ConfigMap, key: &str, default: u64) -> Result<u64> {
    match map.get(key) {
        None => Ok(default),
        Some(ConfigValue::Number(value))
            if value.is_finite() && *value >= 0.0 && value.fract() == 0.0 =>
        {
            Ok(*value as u64)
        }
        Some(other) => Err(wrong_type(key, "non-negative integer", other)),
    }
}

fn boolean(map: &ConfigMap, key: &str, default: bool) -> Result<bool> {
    match map.get(key) {
        None => Ok(default),
        Some(ConfigValue::Bool(value)) => Ok(*value),
        Some(other) => Err(wrong_type(key, "boolean", other)),
    }
}

fn text(map: &ConfigMap, key: &str, default: &str) -> Result<String> {
    match map.get(key) {
        None => Ok(default.to_string()),
        Some(ConfigValue::Text(value)) => Ok(value.clone()),
        // ids like "42" arrive as numbers once parsed
        Some(ConfigValue::Number(value)) => Ok(value.to_string()),
        Some(other) => Err(wrong_type(key, "string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, ConfigValue)]) -> ConfigMap {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_empty_map_yields_defaults() {
        let config = PipelineConfig::from_map(&ConfigMap::new()).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.quality_threshold, 85.0);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_reads_all_keys() {
        let config = PipelineConfig::from_map(&map(&[
            (keys::WEIGHT_ENVIRONMENTAL, ConfigValue::Number(0.5)),
            (keys::WEIGHT_SOCIAL, ConfigValue::Number(0.25)),
            (keys::WEIGHT_GOVERNANCE, ConfigValue::Number(0.25)),
            (keys::QUALITY_THRESHOLD, ConfigValue::Number(90.0)),
            (keys::SCORE_MIN, ConfigValue::Number(1.0)),
            (keys::SCORE_MAX, ConfigValue::Number(10.0)),
            (keys::NORMALIZE_ENABLED, ConfigValue::Bool(true)),
            (keys::BATCH_SIZE, ConfigValue::Number(50.0)),
            (keys::PORTFOLIO_ID, "P9".into()),
            (keys::PORTFOLIO_NAME, "Green".into()),
            (keys::RETRY_MAX_ATTEMPTS, ConfigValue::Number(5.0)),
            (keys::RETRY_BASE_DELAY_MS, ConfigValue::Number(10.0)),
            ("some.unknown.key", "ignored".into()),
        ]))
        .unwrap();

        assert_eq!(config.weights.environmental(), 0.5);
        assert_eq!(config.score_bounds, ScoreBounds::new(1.0, 10.0));
        assert_eq!(config.quality_threshold, 90.0);
        assert!(config.normalize_before_scoring);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.portfolio_id, "P9");
        assert_eq!(config.portfolio_name, "Green");
        assert_eq!(
            config.retry,
            RetryPolicy::new(5, Duration::from_millis(10))
        );
    }

    #[test]
    fn test_fractional_threshold_scaled() {
        let entries = [(keys::QUALITY_THRESHOLD, ConfigValue::Number(0.85))];
        let config = PipelineConfig::from_map(&map(&entries)).unwrap();
        assert!((config.quality_threshold - 85.0).abs() < 1e-9);
        assert!(config.passes_quality_gate(85.0));
        assert!(!config.passes_quality_gate(84.99));
    }

    #[test]
    fn test_threshold_of_one_is_a_percentage() {
        let entries = [(keys::QUALITY_THRESHOLD, ConfigValue::Number(1.0))];
        let config = PipelineConfig::from_map(&map(&entries)).unwrap();
        assert_eq!(config.quality_threshold, 1.0);
        assert!(config.passes_quality_gate(1.0));
        assert!(!config.passes_quality_gate(0.99));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let entries = [(keys::WEIGHT_ENVIRONMENTAL, ConfigValue::Number(0.9))];
        let err = PipelineConfig::from_map(&map(&entries)).unwrap_err();
        assert!(matches!(err, Error::Scoring(_)));
    }

    #[test]
    fn test_wrong_types_rejected() {
        let cases = [
            (keys::WEIGHT_SOCIAL, ConfigValue::from("high")),
            (keys::NORMALIZE_ENABLED, ConfigValue::Number(1.0)),
            (keys::BATCH_SIZE, ConfigValue::Number(2.5)),
            (keys::RETRY_MAX_ATTEMPTS, ConfigValue::Number(-1.0)),
            (keys::PORTFOLIO_ID, ConfigValue::Bool(true)),
        ];
        for (key, value) in cases {
            let err = PipelineConfig::from_map(&map(&[(key, value)])).unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfigValue(_)),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let entries = [(keys::SCORE_MIN, ConfigValue::Number(100.0))];
        let err = PipelineConfig::from_map(&map(&entries)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_config_value_parse() {
        assert_eq!(ConfigValue::parse("TRUE"), ConfigValue::Bool(true));
        assert_eq!(ConfigValue::parse(" 0.4 "), ConfigValue::Number(0.4));
        assert_eq!(ConfigValue::parse("P1"), ConfigValue::Text("P1".to_string()));
        assert_eq!(ConfigValue::parse("NaN"), ConfigValue::Text("NaN".to_string()));
    }
}
