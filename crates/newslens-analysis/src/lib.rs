//! Article analysis pipeline for newslens
//!
//! This crate turns a news article into an enriched set of impacted
//! companies:
//!
//! 1. A fixed analyst prompt sends the article to the language model
//! 2. The extractor recovers a validated JSON entity array from the
//!    model's free-text response (handling Markdown fence envelopes)
//! 3. Unique ticker symbols are enriched with recent market statistics,
//!    tolerating per-symbol failures
//! 4. The orchestrator composes everything into an [`AnalysisResult`]
//!
//! # Example
//!
//! ```rust,ignore
//! use newslens_analysis::{AnalyzerConfig, ArticleAnalyzer};
//! use newslens_llm::providers::GeminiProvider;
//! use newslens_market::{MarketConfig, MarketEnricher, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(GeminiProvider::from_env()?);
//!     let enricher = MarketEnricher::new(
//!         Arc::new(YahooFinanceClient::new()),
//!         MarketConfig::default(),
//!     );
//!
//!     let analyzer = ArticleAnalyzer::new(provider, enricher, AnalyzerConfig::default())?;
//!     let result = analyzer.analyze("Tesla announces breakthrough...").await?;
//!     println!("{} companies identified", result.total_companies);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod orchestrator;
pub mod prompts;

// Re-export main types for convenience
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use extract::{extract_entities, strip_code_fence, unique_symbols};
pub use model::{AnalysisResult, CompanyAnalysis, Recommendation, Sentiment};
pub use orchestrator::ArticleAnalyzer;
