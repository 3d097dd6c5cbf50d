// ── Core error types ──
//
// User-facing errors from castmin-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<castmin_api::Error>`
// impl translates transport-layer errors into domain variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource} with id {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    #[error("Invalid identifier for {resource}: {identifier}")]
    InvalidId {
        resource: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by server: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<castmin_api::Error> for CoreError {
    fn from(err: castmin_api::Error) -> Self {
        match err {
            castmin_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            castmin_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            castmin_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            castmin_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            castmin_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            castmin_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            castmin_api::Error::Http { status: 404, message } => CoreError::NotFound {
                resource: "resource".into(),
                identifier: message,
            },
            castmin_api::Error::Http { status: 409, message } => CoreError::Rejected { message },
            castmin_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            castmin_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

/// A cloneable record of a failed fetch, kept in slice state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceError {
    pub message: String,
    pub status: Option<u16>,
}

impl From<&CoreError> for SliceError {
    fn from(err: &CoreError) -> Self {
        let status = match err {
            CoreError::Api { status, .. } => *status,
            CoreError::NotFound { .. } => Some(404),
            _ => None,
        };
        Self {
            message: err.to_string(),
            status,
        }
    }
}

impl std::fmt::Display for SliceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_rejected() {
        let err = CoreError::from(castmin_api::Error::Http {
            status: 409,
            message: "theme in use".into(),
        });
        assert!(matches!(err, CoreError::Rejected { ref message } if message == "theme in use"));
    }

    #[test]
    fn slice_error_keeps_status() {
        let err = CoreError::Api {
            message: "boom".into(),
            status: Some(500),
        };
        let recorded = SliceError::from(&err);
        assert_eq!(recorded.status, Some(500));
        assert_eq!(recorded.to_string(), "API error: boom");
    }
}
