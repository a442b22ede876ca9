use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::constants::{MAX_SCORE, MIN_SCORE};

/// One of the three ESG sub-score dimensions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreDimension {
    Environmental,
    Social,
    Governance,
}

impl ScoreDimension {
    pub const ALL: [ScoreDimension; 3] = [
        ScoreDimension::Environmental,
        ScoreDimension::Social,
        ScoreDimension::Governance,
    ];

    /// Field name used in validation errors and reports.
    pub fn field_name(&self) -> &'static str {
        match self {
            ScoreDimension::Environmental => "environmentalScore",
            ScoreDimension::Social => "socialScore",
            ScoreDimension::Governance => "governanceScore",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreDimension::Environmental => "Environmental",
            ScoreDimension::Social => "Social",
            ScoreDimension::Governance => "Governance",
        }
    }
}

impl std::fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inclusive range a sub-score must fall in to be usable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl ScoreBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: MIN_SCORE,
            max: MAX_SCORE,
        }
    }
}

/// A single security position carrying three ESG sub-scores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    // Identity
    pub id: String,
    pub symbol: String,
    pub company_name: String,
    pub sector: String,

    // Sub-scores as reported by the source
    pub environmental: Option<f64>,
    pub social: Option<f64>,
    pub governance: Option<f64>,

    /// Weighted composite, set by the score calculator
    pub composite: Option<f64>,

    pub market_value: Option<f64>,

    /// Name of the file or feed the holding was read from
    pub data_source: Option<String>,
    pub last_updated: DateTime<Utc>,

    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Holding {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            company_name: company_name.into(),
            sector: sector.into(),
            environmental: None,
            social: None,
            governance: None,
            composite: None,
            market_value: None,
            data_source: None,
            last_updated: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_scores(mut self, environmental: f64, social: f64, governance: f64) -> Self {
        self.environmental = Some(environmental);
        self.social = Some(social);
        self.governance = Some(governance);
        self
    }

    pub fn with_market_value(mut self, market_value: f64) -> Self {
        self.market_value = Some(market_value);
        self
    }

    pub fn with_data_source(mut self, source: impl Into<String>) -> Self {
        self.data_source = Some(source.into());
        self
    }

    pub fn score(&self, dimension: ScoreDimension) -> Option<f64> {
        match dimension {
            ScoreDimension::Environmental => self.environmental,
            ScoreDimension::Social => self.social,
            ScoreDimension::Governance => self.governance,
        }
    }

    pub fn set_score(&mut self, dimension: ScoreDimension, value: Option<f64>) {
        match dimension {
            ScoreDimension::Environmental => self.environmental = value,
            ScoreDimension::Social => self.social = value,
            ScoreDimension::Governance => self.governance = value,
        }
        self.last_updated = Utc::now();
    }

    /// Returns `(environmental, social, governance)` when all three are present.
    pub fn sub_scores(&self) -> Option<(f64, f64, f64)> {
        match (self.environmental, self.social, self.governance) {
            (Some(env), Some(soc), Some(gov)) => Some((env, soc, gov)),
            _ => None,
        }
    }

    /// True when all three sub-scores are present and inside `bounds`.
    ///
    /// Market value is not considered.
    pub fn has_valid_scores(&self, bounds: &ScoreBounds) -> bool {
        self.sub_scores()
            .map(|(env, soc, gov)| {
                bounds.contains(env) && bounds.contains(soc) && bounds.contains(gov)
            })
            .unwrap_or(false)
    }

    /// True when any present sub-score falls outside `bounds`.
    pub fn has_out_of_range_score(&self, bounds: &ScoreBounds) -> bool {
        ScoreDimension::ALL
            .iter()
            .filter_map(|dimension| self.score(*dimension))
            .any(|score| !bounds.contains(score))
    }
}

