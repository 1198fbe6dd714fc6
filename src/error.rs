// src/error.rs

//! Unified error handling for the mirror.

use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Upstream API answered with a non-success status
    #[error("HTTP error! status: {status} ({endpoint})")]
    Api { endpoint: String, status: u16 },

    /// A raced fetch did not finish in time
    #[error("Request timeout after {secs}s: {context}")]
    Timeout { context: String, secs: u64 },

    /// A path segment failed validation before reaching the API
    #[error("Invalid path segment '{segment}'")]
    InvalidPath { segment: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an upstream status error.
    pub fn api(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a timeout error with context.
    pub fn timeout(context: impl fmt::Display, secs: u64) -> Self {
        Self::Timeout {
            context: context.to_string(),
            secs,
        }
    }

    /// Create an invalid path segment error.
    pub fn invalid_path(segment: impl Into<String>) -> Self {
        Self::InvalidPath {
            segment: segment.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status this error maps to at the server edge.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPath { .. } => StatusCode::NOT_FOUND,
            Self::Api { status: 404, .. } => StatusCode::NOT_FOUND,
            Self::Api { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_matches_upstream_wording() {
        let err = AppError::api("/articles/latest", 503);
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 503 (/articles/latest)"
        );
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            AppError::invalid_path("a/b").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::api("/x", 404).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::api("/x", 500).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::timeout("sitemap", 10).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::config("bad").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
