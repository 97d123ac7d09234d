//! Error types for prompt templating

use thiserror::Error;

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur when building or rendering templates
#[derive(Error, Debug)]
pub enum PromptError {
    /// Template source failed to compile
    #[error("Template '{name}' failed to compile: {detail}")]
    CompileError {
        /// Template name
        name: String,
        /// Engine error detail
        detail: String,
    },

    /// Template rendering failed
    #[error("Template '{name}' failed to render: {detail}")]
    RenderError {
        /// Template name
        name: String,
        /// Engine error detail
        detail: String,
    },
}
