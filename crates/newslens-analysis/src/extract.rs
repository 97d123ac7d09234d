//! Entity extraction from raw model responses
//!
//! The model is asked for a bare JSON array but routinely wraps it in a
//! Markdown code fence. Recovery is limited to unwrapping that envelope;
//! the JSON itself is validated strictly and never repaired.

use crate::error::AnalysisError;
use crate::model::CompanyAnalysis;
use newslens_market::SENTINEL_SYMBOL;
use tracing::debug;

/// Maximum characters of raw response kept for diagnostics
const EXCERPT_LEN: usize = 200;

/// Remove a Markdown code fence envelope, if present
///
/// Handles ```` ```json ````, a plain ```` ``` ````, and no fence at all,
/// tolerating trailing whitespace and newlines around the markers.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a raw model response into validated analysis entities
///
/// Policy: all-or-nothing. A response where any element is structurally
/// invalid rejects the whole batch; partial trust in model output is unsafe.
pub fn extract_entities(raw: &str) -> Result<Vec<CompanyAnalysis>, AnalysisError> {
    let cleaned = strip_code_fence(raw);

    let entities: Vec<CompanyAnalysis> =
        serde_json::from_str(cleaned).map_err(|e| AnalysisError::MalformedResponse {
            detail: e.to_string(),
            excerpt: excerpt(raw),
        })?;

    for entity in &entities {
        entity
            .validate()
            .map_err(|reason| AnalysisError::MalformedResponse {
                detail: format!("invalid entity '{}': {reason}", entity.company_name),
                excerpt: excerpt(raw),
            })?;
    }

    debug!(count = entities.len(), "extracted analysis entities");
    Ok(entities)
}

/// Deduplicated ticker symbols in first-seen order, sentinel excluded
///
/// Symbols are the enrichment query keys; rows are never merged, so two rows
/// sharing a symbol yield one query.
pub fn unique_symbols(entities: &[CompanyAnalysis]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for entity in entities {
        if entity.stock_symbol != SENTINEL_SYMBOL && !symbols.contains(&entity.stock_symbol) {
            symbols.push(entity.stock_symbol.clone());
        }
    }
    symbols
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ARRAY: &str = r#"[
        {
            "company_name": "Tesla Inc",
            "stock_symbol": "TSLA",
            "sentiment": "Positive",
            "impact": 5,
            "recommendation": "BUY",
            "reasoning": "Battery breakthrough directly benefits Tesla."
        },
        {
            "company_name": "Panasonic Holdings",
            "stock_symbol": "PCRFY",
            "sentiment": "Positive",
            "impact": 3,
            "recommendation": "HOLD",
            "reasoning": "Key battery supplier to Tesla."
        }
    ]"#;

    #[test]
    fn test_strip_no_fence() {
        assert_eq!(strip_code_fence("  [1, 2]\n"), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fence() {
        let wrapped = format!("```json\n{VALID_ARRAY}\n```\n");
        assert_eq!(strip_code_fence(&wrapped), VALID_ARRAY.trim());
    }

    #[test]
    fn test_strip_plain_fence() {
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn test_strip_fence_with_trailing_whitespace() {
        let wrapped = "```json  \n[1]\n```   \n\n";
        assert_eq!(strip_code_fence(wrapped), "[1]");
    }

    #[test]
    fn test_extract_valid_array() {
        let entities = extract_entities(VALID_ARRAY).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].stock_symbol, "TSLA");
        assert_eq!(entities[1].stock_symbol, "PCRFY");
    }

    #[test]
    fn test_extract_is_fence_invariant() {
        let plain = extract_entities(VALID_ARRAY).unwrap();

        for wrapped in [
            format!("```json\n{VALID_ARRAY}\n```"),
            format!("```\n{VALID_ARRAY}\n```\n\n"),
            format!("  {VALID_ARRAY}  "),
        ] {
            let entities = extract_entities(&wrapped).unwrap();
            assert_eq!(entities.len(), plain.len());
            assert_eq!(entities[0].stock_symbol, plain[0].stock_symbol);
        }
    }

    #[test]
    fn test_extract_rejects_non_json() {
        let raw = "I'm sorry, I cannot analyze this article.";
        let err = extract_entities(raw).unwrap_err();

        match err {
            AnalysisError::MalformedResponse { excerpt, .. } => {
                assert!(excerpt.starts_with("I'm sorry"));
            }
            _ => panic!("Expected MalformedResponse"),
        }
    }

    #[test]
    fn test_extract_rejects_whole_batch_on_one_bad_entity() {
        let raw = r#"[
            {
                "company_name": "Tesla Inc",
                "stock_symbol": "TSLA",
                "sentiment": "Positive",
                "impact": 5,
                "recommendation": "BUY",
                "reasoning": "Valid entry."
            },
            {
                "company_name": "Broken Corp",
                "stock_symbol": "BRK",
                "sentiment": "Neutral",
                "impact": 9,
                "recommendation": "HOLD",
                "reasoning": "Impact out of range."
            }
        ]"#;

        assert!(extract_entities(raw).is_err());
    }

    #[test]
    fn test_extract_rejects_missing_field() {
        let raw = r#"[{ "company_name": "Tesla Inc", "stock_symbol": "TSLA" }]"#;
        assert!(extract_entities(raw).is_err());
    }

    #[test]
    fn test_excerpt_truncated() {
        let raw = "x".repeat(500);
        let err = extract_entities(&raw).unwrap_err();

        match err {
            AnalysisError::MalformedResponse { excerpt, .. } => {
                assert_eq!(excerpt.chars().count(), EXCERPT_LEN);
            }
            _ => panic!("Expected MalformedResponse"),
        }
    }

    #[test]
    fn test_unique_symbols_first_seen_order() {
        let raw = r#"[
            {"company_name": "A", "stock_symbol": "TSLA", "sentiment": "Positive", "impact": 5, "recommendation": "BUY", "reasoning": "r"},
            {"company_name": "B", "stock_symbol": "AAPL", "sentiment": "Neutral", "impact": 2, "recommendation": "HOLD", "reasoning": "r"},
            {"company_name": "C", "stock_symbol": "TSLA", "sentiment": "Negative", "impact": 3, "recommendation": "SELL", "reasoning": "r"}
        ]"#;

        let entities = extract_entities(raw).unwrap();
        assert_eq!(unique_symbols(&entities), vec!["TSLA", "AAPL"]);
    }

    #[test]
    fn test_unique_symbols_skips_sentinel() {
        let raw = r#"[
            {"company_name": "No specific companies identified", "stock_symbol": "N/A", "sentiment": "Neutral", "impact": 1, "recommendation": "N/A", "reasoning": "No direct impact."}
        ]"#;

        let entities = extract_entities(raw).unwrap();
        assert!(unique_symbols(&entities).is_empty());
    }
}
