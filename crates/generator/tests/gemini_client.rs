//! Tests the Gemini client against a local stub of the REST endpoint.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use generator::{GeminiClient, GenerationRequest, GeneratorError, TextGenerator};

#[derive(Clone, Default)]
struct Captured {
    inner: Arc<Mutex<Vec<(String, Option<String>, serde_json::Value)>>>,
}

/// Starts a stub server that records requests and answers with `reply`.
async fn spawn_stub(status: StatusCode, reply: serde_json::Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/v1beta/models/{action}",
            post(
                move |State(captured): State<Captured>,
                      Path(action): Path<String>,
                      headers: HeaderMap,
                      Json(body): Json<serde_json::Value>| {
                    let reply = reply.clone();
                    async move {
                        let key = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from);
                        captured.inner.lock().unwrap().push((action, key, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn request() -> GenerationRequest {
    GenerationRequest::new(
        "Você é um editor.",
        "Reveja o texto:\n\nola mundo\n\nInstruções extra: Nenhuma",
        "gemini-test",
    )
}

#[tokio::test]
async fn test_sends_key_model_and_both_prompt_parts() {
    let (base, captured) = spawn_stub(
        StatusCode::OK,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Olá, mundo." }] }, "finishReason": "STOP" }]
        }),
    )
    .await;

    let client = GeminiClient::with_api_base("secret-key", base);
    let output = client.generate(request()).await.unwrap();
    assert_eq!(output.text, "Olá, mundo.");

    let calls = captured.inner.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (action, key, body) = &calls[0];
    assert_eq!(action, "gemini-test:generateContent");
    assert_eq!(key.as_deref(), Some("secret-key"));
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Você é um editor.");
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Reveja o texto:\n\nola mundo\n\nInstruções extra: Nenhuma"
    );
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (base, _) = spawn_stub(
        StatusCode::TOO_MANY_REQUESTS,
        serde_json::json!({ "error": { "code": 429, "message": "Resource exhausted" } }),
    )
    .await;

    let client = GeminiClient::with_api_base("secret-key", base);
    let err = client.generate(request()).await.unwrap_err();

    match err {
        GeneratorError::Api { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert!(body.contains("Resource exhausted"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_malformed_response() {
    let (base, _) = spawn_stub(StatusCode::OK, serde_json::json!({ "candidates": "nope" })).await;

    let client = GeminiClient::with_api_base("secret-key", base);
    let err = client.generate(request()).await.unwrap_err();
    assert!(matches!(err, GeneratorError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_blocked_prompt_is_error() {
    let (base, _) = spawn_stub(
        StatusCode::OK,
        serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;

    let client = GeminiClient::with_api_base("secret-key", base);
    let err = client.generate(request()).await.unwrap_err();
    assert!(matches!(err, GeneratorError::Blocked(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::with_api_base("secret-key", format!("http://{addr}"));
    let err = client.generate(request()).await.unwrap_err();
    assert!(matches!(err, GeneratorError::Http(_)));
}
