//! Error types for the analysis pipeline

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures that make the entity list itself unusable
///
/// Per-symbol enrichment problems never appear here; they degrade into
/// all-unavailable financial records inside the enricher.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Article text below the minimum length; rejected before any external call
    #[error("Article text too short: {length} characters (minimum {minimum})")]
    InputTooShort {
        length: usize,
        minimum: usize,
    },

    /// The model's output could not be parsed into valid entities
    ///
    /// Carries the first ~200 characters of the raw response for diagnostics.
    #[error("Failed to parse model analysis: {detail}")]
    MalformedResponse {
        detail: String,
        excerpt: String,
    },

    /// Language model call failed
    #[error("Language model error: {0}")]
    Llm(#[from] newslens_llm::LLMError),

    /// Prompt template error
    #[error("Prompt error: {0}")]
    Prompt(#[from] newslens_prompt::PromptError),
}
