//! Per-channel error types.
//!
//! These never abort a dispatch. They are captured into the
//! [`DispatchOutcome`](crate::models::DispatchOutcome) of the channel that produced them.

use serde::Serialize;
use thiserror::Error;

/// Failure reported by a channel sender.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryError {
    /// Transport-level failure (connection refused, DNS, TLS, timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The provider rejected the credentials
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The provider throttled the request
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// The provider answered with a non-success status
    #[error("Provider rejected message (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The channel configuration is unusable (malformed webhook, chat id)
    #[error("Invalid channel configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Formatting the message for this channel failed
    #[error(transparent)]
    Format(#[from] FormatterError),

    /// The sender panicked while delivering
    #[error("Sender panicked: {message}")]
    Panicked { message: String },
}

impl DeliveryError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A formatter could not produce a message for its channel.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("Failed to format {channel} message: {reason}")]
pub struct FormatterError {
    pub channel: String,
    pub reason: String,
}

/// Failure raised by an email template renderer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Template rendering failed: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Record of an email whose template could not be rendered.
///
/// The email is still handed to its sender with an empty body; this value
/// only marks the outcome as degraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderDegradation {
    pub reason: String,
}

impl From<RenderError> for RenderDegradation {
    fn from(error: RenderError) -> Self {
        Self {
            reason: error.message,
        }
    }
}
