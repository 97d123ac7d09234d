//! Request handlers and wire types
//!
//! Response shapes mirror the browser-extension contract: camelCase keys,
//! `{success, ...}` envelopes, and structured `{error, details, rawResponse?}`
//! failures carrying a truncated raw-model excerpt for diagnosable parse
//! errors without leaking the full payload.

use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use newslens_analysis::{AnalysisError, AnalysisResult};
use newslens_chat::{ChatError, ChatRole, ChatTurn, GroundingContext};
use newslens_market::{DailyQuote, MarketError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

/// Build the API router over the shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/chat", post(chat))
        .route("/stock/:symbol", get(stock))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(rename = "articleText")]
    article_text: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    success: bool,
    #[serde(flatten)]
    result: AnalysisResult,
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    info!(chars = request.article_text.len(), "received article for analysis");

    let result = state.analyzer.analyze(&request.article_text).await?;

    // A fresh analysis becomes the grounding context for subsequent chat turns
    let context = GroundingContext::new(&request.article_text, result.analysis.clone());
    *state.grounding.lock().await = Some(context);

    Ok(Json(AnalyzeResponse {
        success: true,
        result,
    }))
}

#[derive(Debug, Deserialize)]
struct ChatTurnDto {
    role: ChatRole,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(rename = "conversationHistory", default)]
    conversation_history: Vec<ChatTurnDto>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    success: bool,
    response: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    // Holding the lock for the whole turn serializes history mutation
    let mut guard = state.grounding.lock().await;
    let context = guard.as_mut().ok_or(ApiError::NoAnalysis)?;

    if !request.conversation_history.is_empty() {
        let turns = request
            .conversation_history
            .into_iter()
            .map(|dto| ChatTurn {
                role: dto.role,
                content: dto.content,
                timestamp: Utc::now(),
            })
            .collect();
        context.set_history(turns);
    }

    let response = state.chat.respond(context, &request.message).await?;

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}

/// Window queried for the single-stock lookup, in days
const LOOKUP_WINDOW_DAYS: u32 = 30;

/// Number of trailing entries returned by the lookup
const LOOKUP_ENTRIES: usize = 5;

#[derive(Debug, Serialize)]
struct StockResponse {
    symbol: String,
    data: Vec<DailyQuote>,
    summary: StockSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StockSummary {
    current_price: f64,
    volume: u64,
    high: f64,
    low: f64,
}

async fn stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockResponse>, ApiError> {
    info!(symbol, "single stock lookup");

    let quotes = state
        .market
        .daily_history(&symbol, LOOKUP_WINDOW_DAYS)
        .await?;

    let (data, summary) = summarize_window(quotes).ok_or_else(|| {
        ApiError::Market(MarketError::DataUnavailable {
            symbol: symbol.clone(),
            reason: "empty price series".to_string(),
        })
    })?;

    Ok(Json(StockResponse {
        symbol,
        data,
        summary,
    }))
}

/// Keep the trailing entries of a window and derive its summary
fn summarize_window(quotes: Vec<DailyQuote>) -> Option<(Vec<DailyQuote>, StockSummary)> {
    let skip = quotes.len().saturating_sub(LOOKUP_ENTRIES);
    let data: Vec<DailyQuote> = quotes.into_iter().skip(skip).collect();
    let latest = data.last()?;

    let summary = StockSummary {
        current_price: latest.close,
        volume: latest.volume,
        high: data.iter().map(|q| q.high).fold(f64::NEG_INFINITY, f64::max),
        low: data.iter().map(|q| q.low).fold(f64::INFINITY, f64::min),
    };

    Some((data, summary))
}

/// Error envelope for every endpoint
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    Chat(ChatError),
    Market(MarketError),
    NoAnalysis,
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self::Chat(err)
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        Self::Market(err)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::Analysis(AnalysisError::InputTooShort { .. }) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Article text is required and must be at least 100 characters"
                }),
            ),
            Self::Analysis(AnalysisError::MalformedResponse { detail, excerpt }) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to parse AI analysis",
                    "details": detail,
                    "rawResponse": format!("{excerpt}..."),
                }),
            ),
            Self::Analysis(err) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Analysis failed",
                    "details": err.to_string(),
                }),
            ),
            Self::Chat(err) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Chat response failed",
                    "details": err.to_string(),
                }),
            ),
            Self::Market(err) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Failed to fetch stock data",
                    "details": err.to_string(),
                }),
            ),
            Self::NoAnalysis => (
                StatusCode::CONFLICT,
                json!({
                    "error": "No analysis available. Run an article analysis before chatting."
                }),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        warn!(%status, error = %body["error"], "request failed");
        (status, Json(body)).into_response()
    }
}
