//! Application configuration loaded from environment variables.

use generator::DEFAULT_GEMINI_API_BASE;

/// Origins allowed to call the API when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://difftxt.vercel.app",
    "http://localhost:5173",
    "http://localhost:3000",
];

/// Maximum accepted request body, JSON or form-encoded.
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `80`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `GEMINI_API_KEY` — credential handed to the Gemini client at startup
/// - `GEMINI_API_BASE` — Gemini endpoint (default: the public API)
/// - `CORS_ALLOWED_ORIGINS` — comma-separated origin allow-list
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Whether `port` came from `PORT` rather than the default.
    pub port_from_env: bool,
    pub log_level: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub allowed_origins: Vec<String>,
    pub body_limit: usize,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok());

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: port.unwrap_or(defaults.port),
            port_from_env: port.is_some(),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            gemini_api_base: std::env::var("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|raw| parse_origins(&raw))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
            body_limit: defaults.body_limit,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            port_from_env: false,
            log_level: "info".to_string(),
            gemini_api_key: None,
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec(),
            body_limit: BODY_LIMIT_BYTES,
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
