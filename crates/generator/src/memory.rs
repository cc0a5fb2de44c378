//! In-memory generator for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{GeneratorError, Result};
use crate::generator::{GenerationOutput, GenerationRequest, TextGenerator};

#[derive(Debug, Default)]
struct InMemoryGeneratorState {
    reply: String,
    failure: Option<String>,
    calls: Vec<GenerationRequest>,
}

/// Scripted generator that records every request it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGenerator {
    state: Arc<RwLock<InMemoryGeneratorState>>,
}

impl InMemoryGenerator {
    /// Creates a generator that answers every request with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.set_reply(reply);
        generator
    }

    /// Sets the text returned by subsequent calls.
    pub fn set_reply(&self, reply: impl Into<String>) {
        self.state.write().unwrap().reply = reply.into();
    }

    /// Makes subsequent calls fail with `reason`, or succeed again with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        self.state.write().unwrap().failure = reason.map(String::from);
    }

    /// Returns every request received so far, oldest first.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.state.read().unwrap().calls.clone()
    }

    /// Returns the number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls.len()
    }
}

#[async_trait]
impl TextGenerator for InMemoryGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput> {
        let mut state = self.state.write().unwrap();
        state.calls.push(request);

        if let Some(reason) = &state.failure {
            return Err(GeneratorError::Unavailable(reason.clone()));
        }

        Ok(GenerationOutput {
            text: state.reply.clone(),
        })
    }
}
