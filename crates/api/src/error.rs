//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use generator::GeneratorError;

pub const MISSING_TEXT_MESSAGE: &str = "Texto é obrigatório";
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key do Gemini não configurada";
pub const PROCESSING_FAILED_MESSAGE: &str = "Erro ao processar o texto";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Texto excede o tamanho máximo permitido";

/// API-level error type that maps to HTTP responses.
///
/// Every variant answers with a fixed message; upstream detail is logged
/// and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// `text` missing or empty.
    Validation,
    /// The Gemini credential is not configured.
    Configuration,
    /// Request body over the configured limit.
    PayloadTooLarge,
    /// The generator failed while correcting `text`.
    Upstream {
        text: String,
        source: GeneratorError,
    },
}

impl ApiError {
    /// Label recorded in `improve_text_requests_total`.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Validation => "validation_error",
            ApiError::Configuration => "configuration_error",
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::Upstream { .. } => "upstream_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::counter!("improve_text_requests_total", "outcome" => self.outcome()).increment(1);

        let (status, message) = match self {
            ApiError::Validation => {
                tracing::warn!("rejected request without text");
                (StatusCode::BAD_REQUEST, MISSING_TEXT_MESSAGE)
            }
            ApiError::Configuration => {
                tracing::error!("GEMINI_API_KEY is not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, MISSING_CREDENTIAL_MESSAGE)
            }
            ApiError::PayloadTooLarge => {
                tracing::warn!("rejected request body over the size limit");
                (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_MESSAGE)
            }
            ApiError::Upstream { text, source } => {
                tracing::error!(error = %source, %text, "failed to improve text");
                (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED_MESSAGE)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
