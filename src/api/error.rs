//! Error types for the version service client

use serde::Deserialize;
use thiserror::Error;

/// Structured error body returned by every endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
}

/// Errors that can occur talking to the version service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable or fetch-level failure
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("HTTP {status}: {}", describe(message.as_deref(), details))]
    Http {
        status: u16,
        message: Option<String>,
        details: Vec<String>,
    },

    /// Rejected input on create or update
    #[error("Validation failed: {}", describe(message.as_deref(), details))]
    Validation {
        message: Option<String>,
        details: Vec<String>,
    },

    /// The version does not exist
    #[error("Not found: {}", message.as_deref().unwrap_or("version"))]
    NotFound { message: Option<String> },

    /// 2xx response whose body could not be parsed
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a non-2xx status and its (possibly empty) body
    #[must_use]
    pub fn from_status(status: u16, body: ErrorBody) -> Self {
        let message = body.error.filter(|m| !m.trim().is_empty());
        let details = body.details.unwrap_or_default();
        match status {
            404 => Self::NotFound { message },
            400 | 422 => Self::Validation { message, details },
            _ => Self::Http {
                status,
                message,
                details,
            },
        }
    }

    /// The single message to show the user for this failure
    ///
    /// Preference order: structured message (with details appended),
    /// details alone, generic transport text, then the caller's fallback.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => "Network error, please try again later".to_string(),
            Self::Http {
                message, details, ..
            }
            | Self::Validation { message, details } => match (message, details.is_empty()) {
                (Some(m), true) => m.clone(),
                (Some(m), false) => format!("{m}: {}", details.join("; ")),
                (None, false) => details.join("; "),
                (None, true) => fallback.to_string(),
            },
            Self::NotFound { message } => message.clone().unwrap_or_else(|| fallback.to_string()),
            Self::Decode(_) => fallback.to_string(),
        }
    }

    /// HTTP status, when the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Validation { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether this is a 404
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

fn describe(message: Option<&str>, details: &[String]) -> String {
    match (message, details.is_empty()) {
        (Some(m), true) => m.to_string(),
        (Some(m), false) => format!("{m} ({})", details.join("; ")),
        (None, false) => details.join("; "),
        (None, true) => "no details".to_string(),
    }
}

/// Result type for service calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;
