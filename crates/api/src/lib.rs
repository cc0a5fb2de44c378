//! HTTP API for the DiffText backend.
//!
//! Relays text-correction requests to a generative-language model and
//! returns the corrected text, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod credentials;
pub mod error;
pub mod prompt;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use generator::TextGenerator;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use credentials::CredentialGuard;
use routes::improve::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle, config: &Config) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::status::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::status::root))
        .route("/api/health", get(routes::status::health))
        .route("/api/improve-text", post(routes::improve::improve_text))
        .with_state(state)
        .merge(metrics_router)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a long-lived generator handle.
pub fn create_state(generator: Arc<dyn TextGenerator>, credentials: CredentialGuard) -> Arc<AppState> {
    Arc::new(AppState {
        generator,
        credentials,
    })
}

/// CORS policy: listed origins only, with credentials, `Content-Type` only.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            // A wildcard cannot be combined with credentials.
            if origin == "*" {
                tracing::warn!("ignoring wildcard CORS origin");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
