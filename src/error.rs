//! Error types shared across the crate.
//!
//! Remote failures are described by [`ApiError`]; the API layer flattens it
//! into the human-readable message carried by `ApiResponse::error`. The
//! application edges (terminal, config files) use `anyhow`.

use thiserror::Error;

/// Generic message used when neither the server nor the transport says anything useful.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

pub type Result<T> = anyhow::Result<T>;

/// Failure of a single request against the users resource.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP answer (connect, DNS, body read...).
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The server answered 2xx but the body was not the expected record shape.
    #[error("Unexpected response from server: {0}")]
    Shape(String),
}

impl ApiError {
    /// Build a status error, preferring the server's own `message` field.
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        Self::Status { status, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(FALLBACK_MESSAGE.to_string())
        } else {
            Self::Transport(message)
        }
    }

    /// HTTP status when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Shape(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_status_text() {
        let e = ApiError::from_status(400, Some("Email already exists".into()));
        assert_eq!(e.to_string(), "Email already exists");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn blank_server_message_falls_back_to_status_text() {
        let e = ApiError::from_status(500, Some("  ".into()));
        assert_eq!(e.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn empty_transport_text_uses_generic_fallback() {
        assert_eq!(ApiError::transport("").to_string(), FALLBACK_MESSAGE);
    }
}
