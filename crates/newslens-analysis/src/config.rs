//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};

/// Configuration for article analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Model identifier passed to the LLM provider
    pub model: String,

    /// Minimum article length (characters) before any external call is made
    pub min_article_len: usize,

    /// Maximum tokens the model may generate
    pub max_tokens: usize,

    /// Sampling temperature; kept low so the JSON contract is respected
    pub temperature: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-05-20".to_string(),
            min_article_len: 100,
            max_tokens: 8192,
            temperature: 0.2,
        }
    }
}

impl AnalyzerConfig {
    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the minimum article length
    pub fn with_min_article_len(mut self, min: usize) -> Self {
        self.min_article_len = min;
        self
    }

    /// Set the maximum output tokens
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
