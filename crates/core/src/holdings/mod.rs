//! Holdings module - the per-security ESG record and its repository contract.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::{Holding, ScoreBounds, ScoreDimension};
pub use holdings_traits::HoldingRepositoryTrait;
