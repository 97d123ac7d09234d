//! Market data enrichment for newslens
//!
//! This crate fetches recent daily price history per ticker symbol and derives
//! the summary statistics attached to analysis entries. Key properties:
//!
//! - Per-symbol failure isolation: one unknown or unreachable symbol degrades
//!   to an all-unavailable snapshot without affecting its siblings
//! - Concurrent fetches bounded by a shared rate limiter
//! - TTL caching of fetched windows
//!
//! The [`MarketDataSource`] trait is the boundary to the external market data
//! call; [`YahooFinanceClient`] is the production implementation.

pub mod cache;
pub mod config;
pub mod enricher;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod yahoo;

// Re-export main types for convenience
pub use cache::{CacheKey, QuoteCache};
pub use config::MarketConfig;
pub use enricher::{MarketEnricher, SENTINEL_SYMBOL};
pub use error::{MarketError, Result};
pub use snapshot::FinancialSnapshot;
pub use source::MarketDataSource;
pub use yahoo::{DailyQuote, YahooFinanceClient};
