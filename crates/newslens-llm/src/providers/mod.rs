//! Concrete LLM provider implementations

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicProvider;
