//! Configuration for market data operations

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for market data fetching and enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// History window for enrichment, in days
    pub window_days: u32,

    /// Cache TTL for fetched price windows
    pub cache_ttl: Duration,

    /// Maximum fetch requests per minute across all symbols
    pub rate_limit_per_minute: u32,

    /// Request timeout duration
    pub request_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            cache_ttl: Duration::from_secs(60),
            rate_limit_per_minute: 60,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(MarketError::ConfigError(
                "window_days must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(MarketError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    window_days: Option<u32>,
    cache_ttl: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    request_timeout: Option<Duration>,
}

impl MarketConfigBuilder {
    /// Set the enrichment history window in days
    pub fn window_days(mut self, days: u32) -> Self {
        self.window_days = Some(days);
        self
    }

    /// Set the cache TTL for price windows
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set the fetch rate limit (requests per minute)
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            window_days: self.window_days.unwrap_or(defaults.window_days),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
