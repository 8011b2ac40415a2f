//! Error types shared by the search controller and its collaborators.

use serde_json::Value;
use thiserror::Error;

/// Fatal misconfiguration, raised while constructing a controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a base URL is required")]
    MissingBaseUrl,
}

/// An error-shaped API answer, or a transport failure normalized to one.
///
/// The country API reports failures as `{"status": 404, "message": "Not Found"}`;
/// network and decode failures carry no status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// A failure below the HTTP layer (connect, TLS, body read, JSON decode).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Read `status` and `message` out of an error-shaped body.
    ///
    /// `status` may arrive as a number or a numeric string; anything else is
    /// dropped. A missing or non-string `message` is rendered as JSON.
    pub fn from_body(body: &Value) -> Self {
        let status = match body.get("status") {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        let message = match body.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => unknown_message(),
            Some(other) => other.to_string(),
        };
        Self { status, message }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "Error {}: {}", status, self.message),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

fn unknown_message() -> String {
    "unknown error".to_string()
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.status().map(|s| s.as_u16()), e.to_string())
    }
}
