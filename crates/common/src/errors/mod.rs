//! Error types for the PitchPilot answer engine
//!
//! Provides:
//! - Distinct error types for the engine's failure classes
//! - Machine-readable error codes for client handling
//! - A structured error envelope for the serving layer
//! - Classification helpers driving the completion fallback

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,

    // External completion errors (8xxx)
    MissingCredential,
    CompletionError,
    CompletionTimeout,
    UpstreamError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,

            // External completion (8xxx)
            ErrorCode::MissingCredential => 8001,
            ErrorCode::CompletionError => 8002,
            ErrorCode::CompletionTimeout => 8003,
            ErrorCode::UpstreamError => 8004,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    // External completion errors
    #[error("Completion credential not configured")]
    MissingCredential,

    #[error("Completion service error: {message}")]
    CompletionError { message: String },

    #[error("Completion timed out after {timeout_ms}ms")]
    CompletionTimeout { timeout_ms: u64 },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::MissingCredential => ErrorCode::MissingCredential,
            AppError::CompletionError { .. } => ErrorCode::CompletionError,
            AppError::CompletionTimeout { .. } => ErrorCode::CompletionTimeout,
            AppError::HttpClient(_) => ErrorCode::UpstreamError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Whether this error came from the external completion path.
    ///
    /// Completion failures are recovered by local synthesis and must never
    /// surface to the caller as an error response.
    pub fn is_completion_failure(&self) -> bool {
        matches!(
            self,
            AppError::MissingCredential
                | AppError::CompletionError { .. }
                | AppError::CompletionTimeout { .. }
                | AppError::HttpClient(_)
        )
    }

    /// Whether this error is caused by caller input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::MissingField { .. }
        )
    }
}

/// Structured error response for the serving layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        // Input errors carry their own message; everything else gets a
        // generic line so internal detail never leaks to the caller.
        let message = if err.is_input_error() {
            err.to_string()
        } else {
            "The request could not be processed".to_string()
        };

        ErrorResponse {
            error: ErrorDetails {
                code: err.code(),
                message,
                details: None,
            },
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
