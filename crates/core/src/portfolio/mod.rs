//! Portfolio module - portfolio model, aggregation and repository contract.

mod aggregator;
mod portfolio_model;
mod portfolio_traits;

pub use aggregator::PortfolioAggregator;
pub use portfolio_model::{EsgScores, Portfolio, PortfolioStatus};
pub use portfolio_traits::PortfolioRepositoryTrait;
