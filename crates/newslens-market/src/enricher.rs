//! Batch enrichment of ticker symbols with derived market statistics
//!
//! Every symbol is an independent unit of work: all fetches run concurrently,
//! and one failing or slow symbol never aborts the batch. A failed fetch maps
//! to [`FinancialSnapshot::unavailable`] for that symbol only.

use crate::cache::{CacheKey, QuoteCache};
use crate::config::MarketConfig;
use crate::snapshot::FinancialSnapshot;
use crate::source::MarketDataSource;
use crate::yahoo::DailyQuote;
use futures::future::join_all;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder symbol of the "no companies identified" sentinel row.
/// Never queried against the market data source.
pub const SENTINEL_SYMBOL: &str = "N/A";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Enricher that maps ticker symbols to financial snapshots
pub struct MarketEnricher {
    source: Arc<dyn MarketDataSource>,
    cache: QuoteCache,
    rate_limiter: SharedRateLimiter,
    config: MarketConfig,
}

impl MarketEnricher {
    /// Create a new enricher over the given market data source
    pub fn new(source: Arc<dyn MarketDataSource>, config: MarketConfig) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(config.rate_limit_per_minute)
                .unwrap_or_else(|| NonZeroU32::new(60).expect("60 is non-zero")),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));
        let cache = QuoteCache::new(config.cache_ttl);

        Self {
            source,
            cache,
            rate_limiter,
            config,
        }
    }

    /// Enrich a deduplicated symbol set with derived market statistics
    ///
    /// The returned mapping covers every non-sentinel input symbol: succeeded
    /// symbols carry derived statistics, failed ones carry the all-unavailable
    /// record. This method never fails as a batch.
    pub async fn enrich(&self, symbols: &[String]) -> HashMap<String, FinancialSnapshot> {
        let queries: Vec<&String> = symbols
            .iter()
            .filter(|s| s.as_str() != SENTINEL_SYMBOL)
            .collect();

        debug!(count = queries.len(), "enriching symbols");

        let fetches = queries.iter().map(|symbol| self.fetch_snapshot(symbol));
        join_all(fetches).await.into_iter().collect()
    }

    /// Fetch one symbol's window and derive its snapshot, absorbing failures
    async fn fetch_snapshot(&self, symbol: &str) -> (String, FinancialSnapshot) {
        let snapshot = match self.window_quotes(symbol).await {
            Ok(quotes) => {
                if quotes.is_empty() {
                    warn!(symbol, "empty price series; marking unavailable");
                }
                FinancialSnapshot::from_quotes(&quotes)
            }
            Err(e) => {
                warn!(symbol, error = %e, "market data fetch failed; continuing without enrichment");
                FinancialSnapshot::unavailable()
            }
        };

        (symbol.to_string(), snapshot)
    }

    async fn window_quotes(&self, symbol: &str) -> crate::error::Result<Vec<DailyQuote>> {
        let key = CacheKey::new(symbol, self.config.window_days);
        self.cache
            .get_or_fetch(key, || async {
                self.rate_limiter.until_ready().await;
                self.source
                    .daily_history(symbol, self.config.window_days)
                    .await
            })
            .await
    }
}
