//! Backend error payloads

use serde::Deserialize;

/// Structured error payload returned by the backend.
///
/// The REST convention wraps failures as `{"error": {...}}` with a status
/// code, a symbolic name, a human-readable message and optionally a
/// machine-readable code such as `MODEL_NOT_FOUND` or
/// `AUTHORIZATION_REQUIRED`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorDetail {
    /// HTTP status code echoed inside the payload.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Symbolic error name (e.g. "ValidationError").
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
    /// Machine-readable error code, if available.
    #[serde(default)]
    pub code: Option<String>,
    /// Additional error metadata, e.g. per-field validation messages.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl BackendErrorDetail {
    /// Creates a new error detail with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            name: None,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Checks if this error carries the given machine-readable code.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl std::fmt::Display for BackendErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
