//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
///
/// Inside the enricher these are recovered per symbol into an all-unavailable
/// snapshot; only the thin single-stock lookup propagates them to callers.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;
