//! Shared application state

use newslens_analysis::ArticleAnalyzer;
use newslens_chat::{ChatEngine, GroundingContext};
use newslens_market::MarketDataSource;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State shared across request handlers
///
/// The grounding context lives behind a Mutex so chat turns are processed one
/// at a time: a new turn waits for the prior turn's response before its
/// history is touched. One context is held at a time; each successful analyze
/// replaces it.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ArticleAnalyzer>,
    pub chat: Arc<ChatEngine>,
    pub market: Arc<dyn MarketDataSource>,
    pub grounding: Arc<Mutex<Option<GroundingContext>>>,
}
