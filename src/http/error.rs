//! Error returned for non-success HTTP responses.

use reqwest::StatusCode;
use serde_json::Value;

/// A non-2xx response from the Escrow API.
///
/// Carried inside `anyhow::Error`; recover it with
/// `err.downcast_ref::<ApiError>()`. Transport failures (DNS, connection
/// refused, TLS) never produce an `ApiError`, so a missing downcast means
/// the request did not complete.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Server-supplied message, or the status line when none could be read.
    pub message: String,
    /// Raw response body, kept for diagnostics when non-empty.
    pub body: Option<String>,
}

impl ApiError {
    /// Builds an error from a status and the raw response text.
    /// A body that is not JSON, or JSON without a message, falls back to
    /// the status line.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let message = extract_message(&body).unwrap_or_else(|| status_line(status));
        let body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        Self {
            status: status.as_u16(),
            message,
            body,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED.as_u16()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Escrow API error (HTTP {}): {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Pulls a human-readable message out of a JSON error body.
/// Tries `message`, then `error`, then the first `errors[].message`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    for key in ["message", "error"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
