//! Market data source trait definition

use crate::error::Result;
use crate::yahoo::DailyQuote;
use async_trait::async_trait;

/// Trait for daily price history sources
///
/// Implementations fetch an ordered (oldest-first) series of daily quotes for
/// one symbol. Unknown or delisted symbols must fail for that symbol only;
/// callers decide whether to recover (the enricher) or propagate (the lookup
/// endpoint).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the daily price history covering the last `days` days
    async fn daily_history(&self, symbol: &str, days: u32) -> Result<Vec<DailyQuote>>;

    /// Get the source name (e.g., "yahoo")
    fn name(&self) -> &str;
}
