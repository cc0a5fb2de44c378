//! Text-improvement endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{FromRequest, Request, State};
use axum::http::{StatusCode, header};
use axum::{Form, Json};
use generator::{GenerationRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credentials::CredentialGuard;
use crate::error::ApiError;
use crate::prompt::{self, GEMINI_MODEL, SYSTEM_INSTRUCTION};

/// Shared application state accessible from all handlers.
pub struct AppState {
    /// Built once at startup and shared by every request.
    pub generator: Arc<dyn TextGenerator>,
    pub credentials: CredentialGuard,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ImproveTextRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl ImproveTextRequest {
    /// Reads `text` and `prompt` by key from a JSON object.
    ///
    /// Anything other than an object has no fields and yields `None`. A field
    /// holding a non-string value counts as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let field = |key: &str| fields.get(key).and_then(Value::as_str).map(String::from);

        Some(Self {
            text: field("text"),
            prompt: field("prompt"),
        })
    }
}

/// Body of an improve-text call, accepted as JSON or form-encoded.
///
/// A body that does not parse carries no usable `text` and is reported as a
/// validation error; only an oversized body gets its own status.
pub struct ImproveTextPayload(pub ImproveTextRequest);

impl<S> FromRequest<S> for ImproveTextPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let parsed = if is_form {
            Form::<ImproveTextRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| (rejection.status(), rejection.body_text()))
        } else {
            Json::<Value>::from_request(req, state)
                .await
                .map_err(|rejection| (rejection.status(), rejection.body_text()))
                .and_then(|Json(value)| {
                    ImproveTextRequest::from_json(&value).ok_or_else(|| {
                        (StatusCode::BAD_REQUEST, "body is not a JSON object".to_string())
                    })
                })
        };

        match parsed {
            Ok(body) => Ok(Self(body)),
            Err((StatusCode::PAYLOAD_TOO_LARGE, _)) => Err(ApiError::PayloadTooLarge),
            Err((status, reason)) => {
                tracing::debug!(%status, %reason, "improve-text body did not parse");
                Err(ApiError::Validation)
            }
        }
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveTextResponse {
    pub improved_text: String,
}

// -- Handlers --

/// POST /api/improve-text — correct accentuation, punctuation and grammar.
#[tracing::instrument(skip_all)]
pub async fn improve_text(
    State(state): State<Arc<AppState>>,
    ImproveTextPayload(req): ImproveTextPayload,
) -> Result<Json<ImproveTextResponse>, ApiError> {
    let text = req
        .text
        .filter(|text| !text.is_empty())
        .ok_or(ApiError::Validation)?;

    if !state.credentials.is_configured() {
        return Err(ApiError::Configuration);
    }

    let request = GenerationRequest::new(
        SYSTEM_INSTRUCTION,
        prompt::user_message(&text, req.prompt.as_deref()),
        GEMINI_MODEL,
    );

    let text_len = text.len();
    let start = Instant::now();
    let result = state.generator.generate(request).await;
    metrics::histogram!("improve_text_upstream_seconds").record(start.elapsed().as_secs_f64());

    let output = result.map_err(|source| ApiError::Upstream { text, source })?;

    metrics::counter!("improve_text_requests_total", "outcome" => "ok").increment(1);
    tracing::info!(
        input_bytes = text_len,
        output_bytes = output.text.len(),
        "text improved"
    );

    Ok(Json(ImproveTextResponse {
        improved_text: output.text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_reads_fields_by_key() {
        let req = ImproveTextRequest::from_json(&serde_json::json!({
            "text": "ola",
            "prompt": "formal"
        }))
        .unwrap();
        assert_eq!(req.text.as_deref(), Some("ola"));
        assert_eq!(req.prompt.as_deref(), Some("formal"));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(ImproveTextRequest::from_json(&serde_json::json!(["ola", "formal"])).is_none());
        assert!(ImproveTextRequest::from_json(&serde_json::json!("ola")).is_none());
        assert!(ImproveTextRequest::from_json(&serde_json::json!(null)).is_none());
    }

    #[test]
    fn test_from_json_non_string_fields_are_absent() {
        let req =
            ImproveTextRequest::from_json(&serde_json::json!({ "text": 5, "prompt": true })).unwrap();
        assert!(req.text.is_none());
        assert!(req.prompt.is_none());
    }
}
