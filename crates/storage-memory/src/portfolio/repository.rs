use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::debug;

use esgfolio_core::errors::DatabaseError;
use esgfolio_core::holdings::Holding;
use esgfolio_core::portfolio::{Portfolio, PortfolioRepositoryTrait};
use esgfolio_core::Result;

use crate::errors::StorageError;

/// Repository for portfolios kept in process memory, in first-save order.
#[derive(Debug, Default)]
pub struct InMemoryPortfolioRepository {
    portfolios: RwLock<Vec<Portfolio>>,
}

impl InMemoryPortfolioRepository {
    /// Creates a new empty InMemoryPortfolioRepository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::result::Result<RwLockReadGuard<'_, Vec<Portfolio>>, StorageError> {
        Ok(self.portfolios.read()?)
    }

    fn write(&self) -> std::result::Result<RwLockWriteGuard<'_, Vec<Portfolio>>, StorageError> {
        Ok(self.portfolios.write()?)
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for InMemoryPortfolioRepository {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Option<Portfolio>> {
        Ok(self
            .read()?
            .iter()
            .find(|portfolio| portfolio.id == portfolio_id)
            .cloned())
    }

    fn get_all_portfolios(&self) -> Result<Vec<Portfolio>> {
        Ok(self.read()?.clone())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    async fn save_portfolio(&self, portfolio: Portfolio) -> Result<()> {
        let mut portfolios = self.write()?;
        match portfolios.iter_mut().find(|p| p.id == portfolio.id) {
            Some(existing) => *existing = portfolio,
            None => portfolios.push(portfolio),
        }
        Ok(())
    }

    async fn add_holding_to_portfolio(&self, portfolio_id: &str, holding: Holding) -> Result<()> {
        let mut portfolios = self.write()?;
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.id == portfolio_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("portfolio {}", portfolio_id)))?;
        portfolio.add_holding(holding);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut portfolios = self.write()?;
        debug!("Cleared {} portfolios", portfolios.len());
        portfolios.clear();
        Ok(())
    }
}
