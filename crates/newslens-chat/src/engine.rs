//! Grounded chat response engine
//!
//! The engine answers follow-up questions strictly from one frozen analysis.
//! It composes a scoped prompt per turn, delegates to the LLM provider, and
//! deterministically enforces the disclaimer on first and advice-seeking
//! turns rather than trusting the model to comply.

use crate::config::ChatConfig;
use crate::context::{ChatTurn, GroundingContext};
use crate::error::Result;
use crate::prompts;
use newslens_analysis::CompanyAnalysis;
use newslens_llm::{CompletionRequest, LLMProvider, Message};
use newslens_prompt::JinjaTemplate;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Fixed disclaimer required on the first response and on advice-seeking turns
pub const DISCLAIMER: &str = "I am an AI assistant, not a licensed financial advisor. The information I provide is for educational purposes only, based on an automated analysis of a specific news article. It should not be considered financial advice. Please consult with a qualified human professional before making any investment decisions.";

/// Substring indicators of a personal-advice or prediction request
const ADVICE_INDICATORS: &[&str] = &[
    "should i buy",
    "should i sell",
    "should i hold",
    "should i invest",
    "should we buy",
    "what should i do",
    "is it a good time",
    "is now a good time",
    "worth buying",
    "worth investing",
    "good investment",
    "price prediction",
    "price target",
    "will it go up",
    "will it go down",
    "will the stock",
];

/// Check whether a message asks for personal advice or predictions
pub fn is_advice_seeking(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ADVICE_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

/// Engine producing responses scoped to one grounding context
pub struct ChatEngine {
    provider: Arc<dyn LLMProvider>,
    template: JinjaTemplate,
    config: ChatConfig,
}

impl ChatEngine {
    /// Create a new engine over the given provider
    pub fn new(provider: Arc<dyn LLMProvider>, config: ChatConfig) -> Result<Self> {
        let template = prompts::grounding_prompt()?;

        Ok(Self {
            provider,
            template,
            config,
        })
    }

    /// Produce a grounded response to one user message
    ///
    /// Appends both the user turn and the reply to the context history,
    /// which stays bounded. The engine performs no data fetches of its own.
    pub async fn respond(
        &self,
        context: &mut GroundingContext,
        user_message: &str,
    ) -> Result<String> {
        let first_message = context.is_fresh();
        let advice = is_advice_seeking(user_message);

        debug!(first_message, advice, "composing grounded chat prompt");

        let history: Vec<serde_json::Value> = context
            .history()
            .iter()
            .map(|turn| json!({ "role": turn.role, "content": turn.content }))
            .collect();

        let prompt = self.template.render(&json!({
            "first_message": first_message,
            "disclaimer": DISCLAIMER,
            "article_excerpt": context.article_excerpt(),
            "analysis": company_summaries(context.analysis()),
            "history": history,
            "user_message": user_message,
        }))?;

        let request = CompletionRequest::builder(self.config.model.clone())
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        let mut reply = response.text().trim().to_string();

        // The disclaimer is a hard guarantee, not a model suggestion
        if (first_message || advice) && !reply.contains(DISCLAIMER) {
            reply = format!("{DISCLAIMER}\n\n{reply}");
        }

        context.push_turn(ChatTurn::user(user_message));
        context.push_turn(ChatTurn::assistant(reply.clone()));

        Ok(reply)
    }
}

/// Compact JSON serialization of each analysis entry for the prompt
///
/// Enrichment fields are included only when present and available, matching
/// the data-scoping rule: the model must never see placeholder values it
/// could mistake for data.
fn company_summaries(analysis: &[CompanyAnalysis]) -> Vec<String> {
    analysis
        .iter()
        .map(|company| {
            let mut entry = json!({
                "company_name": company.company_name,
                "stock_symbol": company.stock_symbol,
                "sentiment": company.sentiment,
                "impact": company.impact,
                "recommendation": company.recommendation,
                "reasoning": company.reasoning,
            });

            if let Some(data) = &company.financial_data {
                if let Some(price) = data.current_price {
                    entry["current_price"] = json!(price);
                }
                if let Some(change) = data.daily_change_percent {
                    entry["daily_change"] = json!(format!("{change}%"));
                }
            }

            serde_json::to_string_pretty(&entry).unwrap_or_default()
        })
        .collect()
}
