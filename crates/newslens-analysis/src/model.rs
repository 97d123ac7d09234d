//! Data model for article analysis results
//!
//! Wire names follow the model's output contract (`company_name`,
//! `stock_symbol`, ...) with the attached enrichment record keyed
//! `financialData`, matching the analyze endpoint's response shape.

use chrono::{DateTime, Utc};
use newslens_market::FinancialSnapshot;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentiment classification for an identified entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Trading recommendation attached to an identified entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
    /// Sentinel value used when no entity could be identified
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// One company the model identified as impacted by the article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    /// Full official name of the company
    pub company_name: String,

    /// Ticker symbol; the dedup/join key for enrichment
    pub stock_symbol: String,

    /// Sentiment for this entity
    pub sentiment: Sentiment,

    /// Potential market impact from 1 (minimal) to 5 (major)
    #[serde(deserialize_with = "deserialize_impact")]
    pub impact: u8,

    /// BUY / SELL / HOLD, or "N/A" on the sentinel row
    pub recommendation: Recommendation,

    /// One-sentence explanation for sentiment, impact, and relevance
    pub reasoning: String,

    /// Market statistics attached by the enricher; absent on sentinel rows
    #[serde(
        rename = "financialData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub financial_data: Option<FinancialSnapshot>,
}

/// Models sometimes emit the impact rating as a quoted string ("3");
/// accept both forms.
fn deserialize_impact<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u8),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid impact rating: {s:?}"))),
    }
}

impl CompanyAnalysis {
    /// Structural validation beyond what serde enforces
    ///
    /// Returns the reason the entity is invalid, if any.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("company_name is empty".to_string());
        }
        if self.stock_symbol.trim().is_empty() {
            return Err("stock_symbol is empty".to_string());
        }
        if !(1..=5).contains(&self.impact) {
            return Err(format!("impact {} outside 1-5", self.impact));
        }
        if self.reasoning.trim().is_empty() {
            return Err("reasoning is empty".to_string());
        }
        Ok(())
    }

    /// True for the "no companies identified" placeholder row
    pub fn is_sentinel(&self) -> bool {
        self.stock_symbol == newslens_market::SENTINEL_SYMBOL
    }
}

/// The composed result of one analyze invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// When the analysis completed
    pub timestamp: DateTime<Utc>,

    /// Whitespace-delimited word count of the input article
    pub article_word_count: usize,

    /// Number of analysis rows (not unique symbols)
    pub total_companies: usize,

    /// Per-company analysis in model output order
    pub analysis: Vec<CompanyAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity_json() -> serde_json::Value {
        json!({
            "company_name": "Tesla Inc",
            "stock_symbol": "TSLA",
            "sentiment": "Positive",
            "impact": 5,
            "recommendation": "BUY",
            "reasoning": "Battery breakthrough directly benefits Tesla."
        })
    }

    #[test]
    fn test_deserialize_entity() {
        let entity: CompanyAnalysis = serde_json::from_value(entity_json()).unwrap();
        assert_eq!(entity.company_name, "Tesla Inc");
        assert_eq!(entity.stock_symbol, "TSLA");
        assert_eq!(entity.sentiment, Sentiment::Positive);
        assert_eq!(entity.impact, 5);
        assert_eq!(entity.recommendation, Recommendation::Buy);
        assert!(entity.financial_data.is_none());
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn test_impact_accepts_string_form() {
        let mut value = entity_json();
        value["impact"] = json!("3");

        let entity: CompanyAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(entity.impact, 3);
    }

    #[test]
    fn test_impact_rejects_garbage_string() {
        let mut value = entity_json();
        value["impact"] = json!("high");

        let result: Result<CompanyAnalysis, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_impact() {
        let mut entity: CompanyAnalysis = serde_json::from_value(entity_json()).unwrap();
        entity.impact = 0;
        assert!(entity.validate().is_err());

        entity.impact = 6;
        assert!(entity.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut entity: CompanyAnalysis = serde_json::from_value(entity_json()).unwrap();
        entity.reasoning = "   ".to_string();
        assert!(entity.validate().is_err());
    }

    #[test]
    fn test_sentinel_row() {
        let value = json!({
            "company_name": "No specific companies identified",
            "stock_symbol": "N/A",
            "sentiment": "Neutral",
            "impact": 1,
            "reasoning": "This article does not impact specific publicly traded companies.",
            "recommendation": "N/A"
        });

        let entity: CompanyAnalysis = serde_json::from_value(value).unwrap();
        assert!(entity.is_sentinel());
        assert_eq!(entity.recommendation, Recommendation::NotApplicable);
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            timestamp: Utc::now(),
            article_word_count: 120,
            total_companies: 0,
            analysis: Vec::new(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("articleWordCount").is_some());
        assert!(value.get("totalCompanies").is_some());
    }

    #[test]
    fn test_financial_data_skipped_when_absent() {
        let entity: CompanyAnalysis = serde_json::from_value(entity_json()).unwrap();
        let value = serde_json::to_value(&entity).unwrap();
        assert!(value.get("financialData").is_none());
    }
}
