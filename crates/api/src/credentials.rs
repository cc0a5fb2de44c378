//! Per-request check that the Gemini credential is configured.

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Decides, on every call, whether the upstream credential is present.
///
/// The environment variant re-reads the variable each time so a deployment
/// missing the key fails each request the same way instead of at boot.
#[derive(Debug, Clone)]
pub enum CredentialGuard {
    /// Reads the named environment variable on every check.
    Env(&'static str),
    /// Fixed answer, for tests and embedding.
    Fixed(Option<String>),
}

impl CredentialGuard {
    /// Guard backed by `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::Env(GEMINI_API_KEY_VAR)
    }

    /// Returns true if a non-empty credential is available right now.
    pub fn is_configured(&self) -> bool {
        match self {
            Self::Env(var) => std::env::var(var).is_ok_and(|value| !value.is_empty()),
            Self::Fixed(value) => value.as_deref().is_some_and(|value| !value.is_empty()),
        }
    }
}
