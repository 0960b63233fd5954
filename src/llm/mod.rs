//! Hosted language model access and the prompts sent to it.
//!
//! [`LanguageModel`] is a single request/response call. The service layer
//! builds prompts with [`prompt`] and sends them through whichever
//! implementation was injected into [`crate::app_state::AppState`].

pub mod anthropic;
pub mod prompt;

use std::fmt;

use async_trait::async_trait;

use crate::error::AdminError;

pub use anthropic::AnthropicClient;

/// One completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Optional system prompt.
    pub system: Option<String>,
    /// The single user message.
    pub user: String,
    /// Output token budget.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request with no system prompt.
    #[must_use]
    pub fn new(user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: None,
            user: user.into(),
            max_tokens,
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A text-completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync + fmt::Debug {
    /// Sends the request and returns the first text block of the reply,
    /// or an empty string when the reply has none.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Llm`] on transport or API failure.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AdminError>;

    /// Default output token budget for this backend.
    fn max_tokens(&self) -> u32;
}
