//! Google Gemini `generateContent` client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GeneratorError, Result};
use crate::generator::{GenerationOutput, GenerationRequest, TextGenerator};

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Finish reasons for which the provider withholds the candidate text.
const BLOCKING_FINISH_REASONS: [&str; 3] = ["SAFETY", "RECITATION", "LANGUAGE"];

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    system_instruction: RequestContent<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                role: Some("user"),
                parts: vec![RequestPart {
                    text: &request.user_message,
                }],
            }],
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart {
                    text: &request.system_instruction,
                }],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

/// Pulls the plain text out of a `generateContent` response.
///
/// Only the first candidate is considered. A candidate that stopped for a
/// blocking reason, or a response carrying prompt feedback instead of
/// candidates, is an error; a candidate without text parts yields `""`.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return match response.prompt_feedback {
            Some(feedback) => {
                let reason = feedback.block_reason.unwrap_or_else(|| "unknown".to_string());
                Err(GeneratorError::Blocked(match feedback.block_reason_message {
                    Some(message) => format!("{reason}: {message}"),
                    None => reason,
                }))
            }
            None => Ok(String::new()),
        };
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(GeneratorError::Blocked(format!(
                "candidate finished with reason {reason}"
            )));
        }
    }

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    /// Creates a client against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, DEFAULT_GEMINI_API_BASE)
    }

    /// Creates a client against a custom base URL.
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_base = api_base.into().trim_end_matches('/').to_string();
        info!(%api_base, api_key_len = api_key.len(), "GeminiClient created");
        Self {
            client: Client::new(),
            api_key,
            api_base,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.api_base)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput> {
        let start = Instant::now();
        let body = GenerateContentRequest::from_request(&request);
        debug!(model = %request.model, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(GeneratorError::Api { status, body: raw });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;
        let text = extract_text(parsed)?;

        info!(
            model = %request.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "Gemini response received"
        );

        Ok(GenerationOutput { text })
    }
}
