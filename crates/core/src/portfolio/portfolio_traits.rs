use async_trait::async_trait;

use super::portfolio_model::Portfolio;
use crate::holdings::Holding;
use crate::Result;

/// Store of aggregated portfolios, keyed by portfolio id.
///
/// Saving a portfolio whose id already exists replaces it.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Option<Portfolio>>;

    fn get_all_portfolios(&self) -> Result<Vec<Portfolio>>;

    fn count(&self) -> Result<usize>;

    async fn save_portfolio(&self, portfolio: Portfolio) -> Result<()>;

    /// Appends a holding to a stored portfolio. Fails with `NotFound` when no
    /// portfolio has that id.
    async fn add_holding_to_portfolio(&self, portfolio_id: &str, holding: Holding) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
