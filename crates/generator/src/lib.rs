//! Generative-language upstream for the DiffText backend.
//!
//! The [`TextGenerator`] trait is the only thing the HTTP layer knows about
//! the remote model: a system instruction and a user message go in, plain
//! text comes out. [`GeminiClient`] talks to the Google Gemini REST API;
//! [`InMemoryGenerator`] is a scripted stand-in for tests.

pub mod error;
pub mod gemini;
pub mod generator;
pub mod memory;

pub use error::{GeneratorError, Result};
pub use gemini::{DEFAULT_GEMINI_API_BASE, GeminiClient};
pub use generator::{GenerationOutput, GenerationRequest, TextGenerator};
pub use memory::InMemoryGenerator;
