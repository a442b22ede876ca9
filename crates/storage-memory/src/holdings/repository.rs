use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::debug;

use esgfolio_core::holdings::{Holding, HoldingRepositoryTrait};
use esgfolio_core::Result;

use crate::errors::StorageError;

#[derive(Debug, Clone)]
struct StoredHolding {
    portfolio_id: String,
    holding: Holding,
}

#[derive(Debug, Default)]
struct HoldingTable {
    rows: Vec<StoredHolding>,
    index: HashMap<String, usize>,
}

/// Repository for holdings kept in process memory.
///
/// Saving an id that already exists replaces the stored holding in place.
#[derive(Debug, Default)]
pub struct InMemoryHoldingRepository {
    table: RwLock<HoldingTable>,
}

impl InMemoryHoldingRepository {
    /// Creates a new empty InMemoryHoldingRepository
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> std::result::Result<RwLockReadGuard<'_, HoldingTable>, StorageError> {
        Ok(self.table.read()?)
    }

    fn write(&self) -> std::result::Result<RwLockWriteGuard<'_, HoldingTable>, StorageError> {
        Ok(self.table.write()?)
    }
}

#[async_trait]
impl HoldingRepositoryTrait for InMemoryHoldingRepository {
    fn find_by_id(&self, holding_id: &str) -> Result<Option<Holding>> {
        let table = self.read()?;
        Ok(table
            .index
            .get(holding_id)
            .map(|&position| table.rows[position].holding.clone()))
    }

    fn find_all(&self) -> Result<Vec<Holding>> {
        Ok(self
            .read()?
            .rows
            .iter()
            .map(|row| row.holding.clone())
            .collect())
    }

    fn find_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Holding>> {
        Ok(self
            .read()?
            .rows
            .iter()
            .filter(|row| row.portfolio_id == portfolio_id)
            .map(|row| row.holding.clone())
            .collect())
    }

    async fn save(&self, portfolio_id: &str, holding: Holding) -> Result<()> {
        let mut table = self.write()?;
        let row = StoredHolding {
            portfolio_id: portfolio_id.to_string(),
            holding,
        };
        match table.index.get(&row.holding.id).copied() {
            Some(position) => table.rows[position] = row,
            None => {
                let position = table.rows.len();
                table.index.insert(row.holding.id.clone(), position);
                table.rows.push(row);
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut table = self.write()?;
        let removed = table.rows.len();
        table.rows.clear();
        table.index.clear();
        debug!("Cleared {} holdings", removed);
        Ok(())
    }
}
