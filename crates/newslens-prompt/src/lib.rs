//! Prompt template management for newslens
//!
//! This crate provides MiniJinja-backed prompt templates used by the analysis
//! pipeline and the chat grounding engine. Templates are named, compiled at
//! construction, and rendered with `serde_json` variables.

pub mod error;
pub mod template;

// Re-export main types
pub use error::{PromptError, Result};
pub use template::JinjaTemplate;
