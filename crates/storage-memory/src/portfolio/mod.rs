//! In-memory storage for portfolios.

mod repository;

pub use repository::InMemoryPortfolioRepository;
