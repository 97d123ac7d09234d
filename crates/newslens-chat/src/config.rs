//! Configuration for the chat grounding engine

use serde::{Deserialize, Serialize};

/// Configuration for grounded chat responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier passed to the LLM provider
    pub model: String,

    /// Maximum tokens the model may generate per turn
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-05-20".to_string(),
            max_tokens: 2048,
            temperature: 0.4,
        }
    }
}

impl ChatConfig {
    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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
