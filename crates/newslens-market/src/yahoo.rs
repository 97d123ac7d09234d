//! Yahoo Finance API client

use crate::error::{MarketError, Result};
use crate::source::MarketDataSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

/// One trading day of price data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuote {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get historical daily quotes for a symbol between two instants
    pub async fn quote_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyQuote>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| DailyQuote {
                date: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooFinanceClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn daily_history(&self, symbol: &str, days: u32) -> Result<Vec<DailyQuote>> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(i64::from(days));
        self.quote_history(symbol, start, end).await
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_daily_history() {
        let client = YahooFinanceClient::new();
        let quotes = client.daily_history("AAPL", 7).await;
        assert!(quotes.is_ok());

        let quotes = quotes.unwrap();
        assert!(!quotes.is_empty());
        assert!(quotes[0].close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol_fails() {
        let client = YahooFinanceClient::new();
        let quotes = client.daily_history("INVALID_SYMBOL_12345", 7).await;
        assert!(quotes.is_err());
    }
}
