//! Chat grounding engine for newslens
//!
//! Multi-turn conversation scoped strictly to one frozen article analysis.
//! The engine never fetches data of its own: every response is produced from
//! the fixed behavioral rules, the bounded article excerpt, the analysis
//! entries, and a rolling ten-turn history.
//!
//! Grounding guarantees:
//! - The first response of a session, and every response to an
//!   advice-seeking message, carries the fixed disclaimer
//! - Questions outside the analysis get the fixed scope-refusal sentence
//! - Recommendations are only ever restated as the analysis's own output,
//!   never as the assistant's opinion

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod prompts;

// Re-export main types for convenience
pub use config::ChatConfig;
pub use context::{ChatRole, ChatTurn, GroundingContext, EXCERPT_LIMIT, MAX_HISTORY};
pub use engine::{ChatEngine, DISCLAIMER, is_advice_seeking};
pub use error::{ChatError, Result};
