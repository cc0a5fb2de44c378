//! API server entry point.

use std::sync::Arc;

use api::config::Config;
use api::credentials::CredentialGuard;
use generator::GeminiClient;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Load .env and configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 4. Build the Gemini client once; the key is re-checked on every request
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, /api/improve-text will fail until it is");
    }
    let generator = GeminiClient::with_api_base(
        config.gemini_api_key.clone().unwrap_or_default(),
        config.gemini_api_base.as_str(),
    );
    let state = api::create_state(Arc::new(generator), CredentialGuard::from_env());

    // 5. Build the application
    let app = api::create_app(state, metrics_handle, &config);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        port_source = if config.port_from_env { "PORT env" } else { "default" },
        "starting API server"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
