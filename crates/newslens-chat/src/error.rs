//! Error types for the chat grounding engine

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while producing a grounded chat response
#[derive(Debug, Error)]
pub enum ChatError {
    /// Language model call failed
    #[error("Language model error: {0}")]
    Llm(#[from] newslens_llm::LLMError),

    /// Prompt template error
    #[error("Prompt error: {0}")]
    Prompt(#[from] newslens_prompt::PromptError),
}
