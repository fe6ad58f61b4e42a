//! Error types for streambridge.
//!
//! Every failure surfaced to an HTTP caller is rendered as an
//! [`ErrorEnvelope`](crate::envelope::ErrorEnvelope); the status code and the
//! envelope's `error` label are derived from the variant.

use std::net::SocketAddr;

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// The main error type for streambridge operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Request Errors ===
    /// The request body is not valid JSON.
    #[error("{0}")]
    InvalidPayload(serde_json::Error),

    /// The request body could not be read, e.g. it exceeded the size limit.
    #[error("{message}")]
    BodyRejected {
        /// Status chosen by the extractor, usually 413.
        status: StatusCode,
        /// Description of the rejection.
        message: String,
    },

    /// Processing failed after the body was parsed.
    #[error("{message}")]
    ProcessingFailure {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The HTTP listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to listen on.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed outside of request parsing.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for streambridge operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        Self::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl Error {
    /// Create a processing failure from anything printable.
    #[must_use]
    pub fn processing(message: impl std::fmt::Display) -> Self {
        Self::ProcessingFailure {
            message: message.to_string(),
        }
    }

    /// HTTP status code reported for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::BodyRejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label placed in the `error` field of an error envelope.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "Invalid JSON payload",
            Self::BodyRejected { .. } => "Invalid request body",
            _ => "Processing failed",
        }
    }

    /// Check if this error was caused by the caller's payload.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Build the JSON error envelope for this error.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.kind_label(), self.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::error!(error = %self, "{}", self.kind_label());
        } else {
            tracing::error!(error = %self, "Error processing crash dump");
        }
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
