//! End-to-end analysis orchestration
//!
//! One analyze call is one sequential model call followed by N concurrent
//! market fetches (one per unique symbol). The article text is threaded
//! explicitly from input to prompt; there is no module-level state.

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::extract::{extract_entities, unique_symbols};
use crate::model::AnalysisResult;
use crate::prompts;
use chrono::Utc;
use newslens_llm::{CompletionRequest, LLMProvider, Message};
use newslens_market::{FinancialSnapshot, MarketEnricher};
use newslens_prompt::JinjaTemplate;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrator composing the extractor and the enricher
pub struct ArticleAnalyzer {
    provider: Arc<dyn LLMProvider>,
    enricher: MarketEnricher,
    prompt: JinjaTemplate,
    config: AnalyzerConfig,
}

impl ArticleAnalyzer {
    /// Create a new analyzer over the given provider and enricher
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        enricher: MarketEnricher,
        config: AnalyzerConfig,
    ) -> Result<Self> {
        let prompt = prompts::analyst_prompt()?;

        Ok(Self {
            provider,
            enricher,
            prompt,
            config,
        })
    }

    /// Analyze an article end to end
    ///
    /// Fails with `InputTooShort` before any external call when the article
    /// is below the configured minimum; model and parse failures are terminal,
    /// per-symbol market failures degrade into unavailable records.
    pub async fn analyze(&self, article_text: &str) -> Result<AnalysisResult> {
        let length = article_text.chars().count();
        if length < self.config.min_article_len {
            return Err(AnalysisError::InputTooShort {
                length,
                minimum: self.config.min_article_len,
            });
        }

        info!(chars = length, "analyzing article");

        let prompt = self.prompt.render(&json!({ "article": article_text }))?;

        let request = CompletionRequest::builder(self.config.model.clone())
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self.provider.complete(request).await?;

        let mut entities = extract_entities(response.text())?;

        let symbols = unique_symbols(&entities);
        debug!(?symbols, "deduplicated ticker symbols");

        let snapshots = self.enricher.enrich(&symbols).await;

        // Re-attach per symbol, preserving row order; sentinel rows keep None
        for entity in &mut entities {
            if !entity.is_sentinel() {
                entity.financial_data = Some(
                    snapshots
                        .get(&entity.stock_symbol)
                        .cloned()
                        .unwrap_or_else(FinancialSnapshot::unavailable),
                );
            }
        }

        info!(companies = entities.len(), "analysis complete");

        Ok(AnalysisResult {
            timestamp: Utc::now(),
            article_word_count: article_text.split_whitespace().count(),
            total_companies: entities.len(),
            analysis: entities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use newslens_llm::{CompletionResponse, TokenUsage};
    use newslens_market::{DailyQuote, MarketConfig, MarketDataSource, MarketError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ARTICLE: &str = "Tesla announces breakthrough battery technology that could double \
        vehicle range while cutting production costs, with suppliers racing to adapt.";

    struct StubProvider {
        response: String,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> newslens_llm::Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse {
                message: Message::assistant(self.response.clone()),
                usage: TokenUsage {
                    input_tokens: 0,
                    output_tokens: 0,
                },
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct StubMarket {
        calls: AtomicUsize,
    }

    impl StubMarket {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MarketDataSource for StubMarket {
        async fn daily_history(
            &self,
            symbol: &str,
            _days: u32,
        ) -> newslens_market::Result<Vec<DailyQuote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match symbol {
                "TSLA" => Ok(vec![
                    DailyQuote {
                        date: Utc::now() - chrono::Duration::days(1),
                        open: 100.0,
                        high: 102.0,
                        low: 98.0,
                        close: 100.0,
                        volume: 1_000,
                    },
                    DailyQuote {
                        date: Utc::now(),
                        open: 101.0,
                        high: 106.0,
                        low: 100.0,
                        close: 105.0,
                        volume: 2_000,
                    },
                ]),
                other => Err(MarketError::DataUnavailable {
                    symbol: other.to_string(),
                    reason: "unknown symbol".to_string(),
                }),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn analyzer(
        provider: Arc<StubProvider>,
        market: Arc<StubMarket>,
    ) -> ArticleAnalyzer {
        ArticleAnalyzer::new(
            provider,
            MarketEnricher::new(market, MarketConfig::default()),
            AnalyzerConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_short_input_rejected_before_any_call() {
        let provider = Arc::new(StubProvider::new("[]"));
        let market = Arc::new(StubMarket::new());
        let analyzer = analyzer(Arc::clone(&provider), Arc::clone(&market));

        let err = analyzer.analyze("Too short to analyze.").await.unwrap_err();

        match err {
            AnalysisError::InputTooShort { minimum, .. } => assert_eq!(minimum, 100),
            _ => panic!("Expected InputTooShort"),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_rows_and_attaches_data() {
        let response = r#"```json
[
    {"company_name": "Tesla Inc", "stock_symbol": "TSLA", "sentiment": "Positive", "impact": 5, "recommendation": "BUY", "reasoning": "Direct beneficiary."},
    {"company_name": "Tesla Energy", "stock_symbol": "TSLA", "sentiment": "Positive", "impact": 4, "recommendation": "BUY", "reasoning": "Same ticker, distinct entity."},
    {"company_name": "Rivian Automotive", "stock_symbol": "RIVN", "sentiment": "Negative", "impact": 3, "recommendation": "SELL", "reasoning": "Competitive pressure."}
]
```"#;
        let provider = Arc::new(StubProvider::new(response));
        let market = Arc::new(StubMarket::new());
        let analyzer = analyzer(Arc::clone(&provider), Arc::clone(&market));

        let result = analyzer.analyze(ARTICLE).await.unwrap();

        assert_eq!(result.total_companies, 3);
        assert_eq!(result.analysis.len(), 3);
        assert_eq!(result.article_word_count, ARTICLE.split_whitespace().count());

        // Non-financial fields unchanged, row order preserved
        assert_eq!(result.analysis[0].company_name, "Tesla Inc");
        assert_eq!(result.analysis[1].company_name, "Tesla Energy");
        assert_eq!(result.analysis[2].stock_symbol, "RIVN");

        // One query per unique symbol, attached to every row sharing it
        assert_eq!(market.calls.load(Ordering::SeqCst), 2);
        let tsla = result.analysis[0].financial_data.as_ref().unwrap();
        assert_eq!(tsla.current_price, Some(105.0));
        assert_eq!(tsla.daily_change_percent, Some(5.0));
        assert_eq!(
            result.analysis[1].financial_data.as_ref().unwrap(),
            tsla
        );

        // Failed symbol degrades, never errors
        let rivn = result.analysis[2].financial_data.as_ref().unwrap();
        assert!(rivn.is_unavailable());
    }

    #[tokio::test]
    async fn test_malformed_response_is_terminal() {
        let provider = Arc::new(StubProvider::new("The companies are Tesla and Rivian."));
        let market = Arc::new(StubMarket::new());
        let analyzer = analyzer(provider, Arc::clone(&market));

        let err = analyzer.analyze(ARTICLE).await.unwrap_err();

        match err {
            AnalysisError::MalformedResponse { excerpt, .. } => {
                assert!(excerpt.starts_with("The companies"));
            }
            _ => panic!("Expected MalformedResponse"),
        }
        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sentinel_row_skips_enrichment() {
        let response = r#"[
            {"company_name": "No specific companies identified", "stock_symbol": "N/A", "sentiment": "Neutral", "impact": 1, "recommendation": "N/A", "reasoning": "No direct market impact."}
        ]"#;
        let provider = Arc::new(StubProvider::new(response));
        let market = Arc::new(StubMarket::new());
        let analyzer = analyzer(provider, Arc::clone(&market));

        let result = analyzer.analyze(ARTICLE).await.unwrap();

        assert_eq!(result.total_companies, 1);
        assert!(result.analysis[0].financial_data.is_none());
        assert_eq!(market.calls.load(Ordering::SeqCst), 0);
    }
}
