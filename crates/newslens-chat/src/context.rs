//! Grounding context for a chat session
//!
//! The context holds the frozen analysis and article excerpt one session is
//! allowed to discuss, plus a bounded rolling conversation history. Only the
//! history mutates over the session's lifetime.

use chrono::{DateTime, Utc};
use newslens_analysis::CompanyAnalysis;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of conversation turns kept in history
pub const MAX_HISTORY: usize = 10;

/// Maximum characters of article text kept as grounding context
pub const EXCERPT_LIMIT: usize = 1000;

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user turn stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant turn stamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The fixed data one chat session is restricted to discussing
///
/// `analysis` and `article_excerpt` never change after construction; the
/// history grows turn by turn and truncates from the front past
/// [`MAX_HISTORY`].
#[derive(Debug, Clone)]
pub struct GroundingContext {
    article_excerpt: String,
    analysis: Vec<CompanyAnalysis>,
    history: VecDeque<ChatTurn>,
    max_history: usize,
}

impl GroundingContext {
    /// Create a context from the article text and its frozen analysis
    ///
    /// The article is truncated to [`EXCERPT_LIMIT`] characters with a
    /// trailing ellipsis, matching what the grounding prompt may carry.
    pub fn new(article_text: &str, analysis: Vec<CompanyAnalysis>) -> Self {
        Self::with_limits(article_text, analysis, EXCERPT_LIMIT, MAX_HISTORY)
    }

    /// Create a context with custom excerpt/history bounds
    pub fn with_limits(
        article_text: &str,
        analysis: Vec<CompanyAnalysis>,
        excerpt_limit: usize,
        max_history: usize,
    ) -> Self {
        let article_excerpt = if article_text.chars().count() > excerpt_limit {
            let truncated: String = article_text.chars().take(excerpt_limit).collect();
            format!("{truncated}...")
        } else {
            article_text.to_string()
        };

        Self {
            article_excerpt,
            analysis,
            history: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// The bounded article excerpt
    pub fn article_excerpt(&self) -> &str {
        &self.article_excerpt
    }

    /// The frozen analysis entries
    pub fn analysis(&self) -> &[CompanyAnalysis] {
        &self.analysis
    }

    /// The conversation history, oldest first
    pub fn history(&self) -> &VecDeque<ChatTurn> {
        &self.history
    }

    /// True before any turn has been exchanged
    pub fn is_fresh(&self) -> bool {
        self.history.is_empty()
    }

    /// Append a turn, dropping the oldest past the history bound
    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.history.push_back(turn);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Replace the history wholesale (e.g., from a client-supplied
    /// conversation), keeping only the most recent bounded turns in order
    pub fn set_history(&mut self, turns: Vec<ChatTurn>) {
        let skip = turns.len().saturating_sub(self.max_history);
        self.history = turns.into_iter().skip(skip).collect();
    }

    /// Number of turns currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
