//! Composite-score weights and the manager that guards updates to them.

use std::sync::RwLock;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::scoring_errors::ScoringError;
use crate::constants::{
    DEFAULT_ENVIRONMENTAL_WEIGHT, DEFAULT_GOVERNANCE_WEIGHT, DEFAULT_SOCIAL_WEIGHT,
    WEIGHT_SUM_TOLERANCE,
};

/// Weights applied to the three sub-scores when computing a composite.
///
/// A value of this type always satisfies `|sum - 1.0| <= 0.001`; the only way
/// to build one from arbitrary numbers is [`EsgWeights::new`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgWeights {
    environmental: f64,
    social: f64,
    governance: f64,
}

impl EsgWeights {
    pub fn new(environmental: f64, social: f64, governance: f64) -> Result<Self, ScoringError> {
        let sum = environmental + social + governance;
        if sum.is_nan() || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::InvalidWeights {
                environmental,
                social,
                governance,
                sum,
            });
        }
        Ok(Self {
            environmental,
            social,
            governance,
        })
    }

    pub fn environmental(&self) -> f64 {
        self.environmental
    }

    pub fn social(&self) -> f64 {
        self.social
    }

    pub fn governance(&self) -> f64 {
        self.governance
    }
}

impl Default for EsgWeights {
    fn default() -> Self {
        Self {
            environmental: DEFAULT_ENVIRONMENTAL_WEIGHT,
            social: DEFAULT_SOCIAL_WEIGHT,
            governance: DEFAULT_GOVERNANCE_WEIGHT,
        }
    }
}

impl std::fmt::Display for EsgWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EsgWeights{{E={:.2}, S={:.2}, G={:.2}}}",
            self.environmental, self.social, self.governance
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeights {
    environmental: f64,
    social: f64,
    governance: f64,
}

impl<'de> Deserialize<'de> for EsgWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawWeights::deserialize(deserializer)?;
        EsgWeights::new(raw.environmental, raw.social, raw.governance)
            .map_err(serde::de::Error::custom)
    }
}

/// Holds the active weights alongside the configured baseline.
///
/// Updates are validated before they replace the active weights, so a rejected
/// update leaves the previous weights in effect.
#[derive(Debug)]
pub struct WeightingManager {
    configured: EsgWeights,
    current: RwLock<EsgWeights>,
}

impl WeightingManager {
    pub fn new(configured: EsgWeights) -> Self {
        Self {
            configured,
            current: RwLock::new(configured),
        }
    }

    pub fn weights(&self) -> EsgWeights {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn update_weights(
        &self,
        environmental: f64,
        social: f64,
        governance: f64,
    ) -> Result<EsgWeights, ScoringError> {
        let weights = match EsgWeights::new(environmental, social, governance) {
            Ok(weights) => weights,
            Err(e) => {
                warn!("Rejected weight update: {}", e);
                return Err(e);
            }
        };
        self.replace(weights);
        debug!("Weights updated to {}", weights);
        Ok(weights)
    }

    /// Restores the weights the manager was created with.
    pub fn reload_weights(&self) -> EsgWeights {
        self.replace(self.configured);
        debug!("Weights reloaded to {}", self.configured);
        self.configured
    }

    fn replace(&self, weights: EsgWeights) {
        match self.current.write() {
            Ok(mut guard) => *guard = weights,
            Err(poisoned) => *poisoned.into_inner() = weights,
        }
    }
}

impl Default for WeightingManager {
    fn default() -> Self {
        Self::new(EsgWeights::default())
    }
}
