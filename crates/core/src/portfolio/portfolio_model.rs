use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;

/// Portfolio-level ESG scores produced by one aggregation call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EsgScores {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
    pub composite: f64,
    pub holding_count: usize,
    pub coverage_percentage: f64,
}

/// Lifecycle state stored with a portfolio. Every portfolio a run builds is active.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioStatus {
    #[default]
    Active,
}

/// An ordered collection of holdings plus their rolled-up scores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub holdings: Vec<Holding>,
    /// Set once the portfolio has been aggregated
    pub aggregate_scores: Option<EsgScores>,
    pub total_value: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub status: PortfolioStatus,
}

impl Portfolio {
    pub fn new(id: impl Into<String>, name: impl Into<String>, holdings: Vec<Holding>) -> Self {
        let mut portfolio = Self {
            id: id.into(),
            name: name.into(),
            description: None,
            holdings,
            aggregate_scores: None,
            total_value: 0.0,
            last_updated: Utc::now(),
            status: PortfolioStatus::Active,
        };
        portfolio.total_value = portfolio.market_value_sum();
        portfolio
    }

    /// Sum of market values; holdings without one contribute zero.
    pub fn market_value_sum(&self) -> f64 {
        self.holdings
            .iter()
            .map(|holding| holding.market_value.unwrap_or(0.0))
            .sum()
    }

    pub fn add_holding(&mut self, holding: Holding) {
        self.holdings.push(holding);
        self.total_value = self.market_value_sum();
        self.last_updated = Utc::now();
    }

    pub fn set_aggregate_scores(&mut self, scores: EsgScores) {
        self.aggregate_scores = Some(scores);
        self.last_updated = Utc::now();
    }
}
