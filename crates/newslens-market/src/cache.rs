//! Caching layer for price windows to reduce API calls

use crate::yahoo::DailyQuote;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for one symbol's price window
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Stock symbol
    pub symbol: String,
    /// History window in days
    pub window_days: u32,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(symbol: impl Into<String>, window_days: u32) -> Self {
        Self {
            symbol: symbol.into(),
            window_days,
        }
    }
}

/// Thread-safe TTL cache for fetched price windows
pub struct QuoteCache {
    cache: Arc<RwLock<TimedCache<CacheKey, Vec<DailyQuote>>>>,
}

impl QuoteCache {
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a window from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<DailyQuote>> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a window into the cache
    pub async fn insert(&self, key: CacheKey, quotes: Vec<DailyQuote>) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, quotes);
    }

    /// Get or fetch a window using the provided fetcher function
    ///
    /// If the window exists in cache, it's returned immediately.
    /// Otherwise, the fetcher function is called and the result is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> Result<Vec<DailyQuote>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<DailyQuote>, E>>,
    {
        if let Some(quotes) = self.get(&key).await {
            tracing::debug!("Cache hit for key: {:?}", key);
            return Ok(quotes);
        }

        tracing::debug!("Cache miss for key: {:?}", key);

        let quotes = fetcher().await?;
        self.insert(key, quotes.clone()).await;

        Ok(quotes)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for QuoteCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quote(close: f64) -> DailyQuote {
        DailyQuote {
            date: Utc::now(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", 7);

        cache.insert(key.clone(), vec![quote(150.0)]).await;

        let retrieved = cache.get(&key).await.unwrap();
        assert_eq!(retrieved.len(), 1);
        assert!((retrieved[0].close - 150.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_get_or_fetch_uses_cache_on_second_call() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", 7);

        let mut call_count = 0;

        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(vec![quote(150.0)]) }
            })
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(call_count, 1);

        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(vec![quote(99.0)]) }
            })
            .await
            .unwrap();
        assert!((result[0].close - 150.0).abs() < f64::EPSILON);
        assert_eq!(call_count, 1); // Should not have incremented
    }

    #[tokio::test]
    async fn test_windows_cached_separately() {
        let cache = QuoteCache::new(Duration::from_secs(60));

        cache.insert(CacheKey::new("AAPL", 7), vec![quote(1.0)]).await;
        cache.insert(CacheKey::new("AAPL", 30), vec![quote(2.0)]).await;

        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert(CacheKey::new("AAPL", 7), vec![quote(1.0)]).await;

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
