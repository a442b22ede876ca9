use async_trait::async_trait;

use super::holdings_model::Holding;
use crate::Result;

/// Trait defining the contract for holding persistence.
///
/// Stores are keyed by holding id with last-write-wins semantics.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    fn find_by_id(&self, holding_id: &str) -> Result<Option<Holding>>;
    fn find_all(&self) -> Result<Vec<Holding>>;
    /// Holdings saved under `portfolio_id`, in save order.
    fn find_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Holding>>;
    async fn save(&self, portfolio_id: &str, holding: Holding) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
