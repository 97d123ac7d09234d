//! Derived market statistics for one symbol's price window

use crate::yahoo::DailyQuote;
use serde::{Deserialize, Serialize};

/// Summary statistics derived from a recent daily price window
///
/// Every field is independently optional: a failed fetch yields the
/// all-`None` record from [`FinancialSnapshot::unavailable`], and a window
/// with a single data point yields a price but no daily change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    /// Close of the most recent trading day
    pub current_price: Option<f64>,

    /// Percent change between the two most recent closes, rounded to 2 decimals
    pub daily_change_percent: Option<f64>,

    /// Latest day's traded volume
    pub volume: Option<u64>,

    /// Highest `high` across the window
    pub weekly_high: Option<f64>,

    /// Lowest `low` across the window
    pub weekly_low: Option<f64>,
}

impl FinancialSnapshot {
    /// The all-unavailable record attached when a symbol's fetch failed
    pub fn unavailable() -> Self {
        Self {
            current_price: None,
            daily_change_percent: None,
            volume: None,
            weekly_high: None,
            weekly_low: None,
        }
    }

    /// True when no field carries data
    pub fn is_unavailable(&self) -> bool {
        self.current_price.is_none()
            && self.daily_change_percent.is_none()
            && self.volume.is_none()
            && self.weekly_high.is_none()
            && self.weekly_low.is_none()
    }

    /// Derive a snapshot from an oldest-first daily price window
    pub fn from_quotes(quotes: &[DailyQuote]) -> Self {
        let Some(latest) = quotes.last() else {
            return Self::unavailable();
        };

        let daily_change_percent = if quotes.len() >= 2 {
            let previous = &quotes[quotes.len() - 2];
            if previous.close == 0.0 {
                None
            } else {
                let raw = (latest.close - previous.close) / previous.close * 100.0;
                Some((raw * 100.0).round() / 100.0)
            }
        } else {
            None
        };

        let weekly_high = quotes
            .iter()
            .map(|q| q.high)
            .fold(None, |acc: Option<f64>, h| {
                Some(acc.map_or(h, |a| a.max(h)))
            });
        let weekly_low = quotes
            .iter()
            .map(|q| q.low)
            .fold(None, |acc: Option<f64>, l| {
                Some(acc.map_or(l, |a| a.min(l)))
            });

        Self {
            current_price: Some(latest.close),
            daily_change_percent,
            volume: Some(latest.volume),
            weekly_high,
            weekly_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn quote(close: f64, high: f64, low: f64, volume: u64, days_ago: i64) -> DailyQuote {
        DailyQuote {
            date: Utc::now() - Duration::days(days_ago),
            open: close,
            high,
            low,
            close,
            volume,
        }
    }

    #[test]
    fn test_full_window() {
        let quotes = vec![
            quote(100.0, 102.0, 98.0, 1_000, 2),
            quote(101.2345, 103.5, 100.1, 2_000, 1),
        ];

        let snapshot = FinancialSnapshot::from_quotes(&quotes);
        assert_eq!(snapshot.current_price, Some(101.2345));
        assert_eq!(snapshot.daily_change_percent, Some(1.23));
        assert_eq!(snapshot.volume, Some(2_000));
        assert_eq!(snapshot.weekly_high, Some(103.5));
        assert_eq!(snapshot.weekly_low, Some(98.0));
    }

    #[test]
    fn test_single_point_has_no_change() {
        let quotes = vec![quote(50.0, 51.0, 49.0, 500, 0)];

        let snapshot = FinancialSnapshot::from_quotes(&quotes);
        assert_eq!(snapshot.current_price, Some(50.0));
        assert_eq!(snapshot.daily_change_percent, None);
        assert_eq!(snapshot.volume, Some(500));
    }

    #[test]
    fn test_empty_window_is_unavailable() {
        let snapshot = FinancialSnapshot::from_quotes(&[]);
        assert!(snapshot.is_unavailable());
    }

    #[test]
    fn test_negative_change_rounds() {
        let quotes = vec![
            quote(200.0, 201.0, 199.0, 100, 1),
            quote(190.0, 195.0, 189.0, 100, 0),
        ];

        let snapshot = FinancialSnapshot::from_quotes(&quotes);
        assert_eq!(snapshot.daily_change_percent, Some(-5.0));
    }

    #[test]
    fn test_zero_previous_close_has_no_change() {
        let quotes = vec![
            quote(0.0, 1.0, 0.0, 100, 1),
            quote(10.0, 11.0, 9.0, 100, 0),
        ];

        let snapshot = FinancialSnapshot::from_quotes(&quotes);
        assert_eq!(snapshot.daily_change_percent, None);
        assert_eq!(snapshot.current_price, Some(10.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(FinancialSnapshot::unavailable()).unwrap();
        assert!(json.get("currentPrice").is_some());
        assert!(json.get("dailyChangePercent").is_some());
        assert!(json.get("weeklyHigh").is_some());
    }
}
