//! The upstream seam: one call, text in, text out.

use async_trait::async_trait;

use crate::error::Result;

/// A single generation call: the fixed persona plus the user's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_message: String,
    pub model: String,
}

impl GenerationRequest {
    pub fn new(
        system_instruction: impl Into<String>,
        user_message: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
            model: model.into(),
        }
    }
}

/// Plain text produced by the remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub text: String,
}

/// Trait for remote generative-language services.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the system instruction and user message as separate inputs and
    /// returns the model's text.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput>;
}
