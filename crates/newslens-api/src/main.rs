//! newslens API server
//!
//! Wires the analysis pipeline and chat engine behind an HTTP surface:
//! `POST /analyze`, `POST /chat`, `GET /stock/:symbol`, `GET /health`.

mod routes;
mod state;

use axum::extract::DefaultBodyLimit;
use newslens_analysis::{AnalyzerConfig, ArticleAnalyzer};
use newslens_chat::{ChatConfig, ChatEngine};
use newslens_llm::LLMProvider;
use newslens_llm::providers::{AnthropicProvider, GeminiProvider};
use newslens_market::{MarketConfig, MarketDataSource, MarketEnricher, YahooFinanceClient};
use state::AppState;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Article payloads from the extension can be large; cap at 10 MB
const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let provider = provider_from_env()?;
    let market: Arc<dyn MarketDataSource> = Arc::new(YahooFinanceClient::new());

    let enricher = MarketEnricher::new(Arc::clone(&market), MarketConfig::default());
    let analyzer = Arc::new(ArticleAnalyzer::new(
        Arc::clone(&provider),
        enricher,
        AnalyzerConfig::default(),
    )?);
    let chat = Arc::new(ChatEngine::new(provider, ChatConfig::default())?);

    let app_state = AppState {
        analyzer,
        chat,
        market,
        grounding: Arc::new(Mutex::new(None)),
    };

    let app = routes::router(app_state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Select the LLM provider from `NEWSLENS_PROVIDER` (default: gemini)
fn provider_from_env() -> anyhow::Result<Arc<dyn LLMProvider>> {
    let provider: Arc<dyn LLMProvider> = match std::env::var("NEWSLENS_PROVIDER").as_deref() {
        Ok("anthropic") => Arc::new(AnthropicProvider::from_env()?),
        _ => Arc::new(GeminiProvider::from_env()?),
    };

    tracing::info!(provider = provider.name(), "llm provider configured");
    Ok(provider)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
