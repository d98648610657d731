//! Error types for Planforge
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Planforge operations
///
/// Every failure is scoped to a single user action. Only configuration
/// errors raised at startup stop the process.
#[derive(Error, Debug)]
pub enum PlanforgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// A request was submitted with nothing to work on
    ///
    /// Raised for blank plan text and for diagram requests made before any
    /// plan exists. Surfaced as a warning, never fatal.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A prompt template name outside the fixed catalog
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Unrecognised diagram type label
    #[error("Unknown diagram type: {0}")]
    UnknownDiagramType(String),

    /// External renderer exited non-zero or produced no image
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single completion call
///
/// Returned by [`crate::providers::CompletionClient::complete`]. The workflow
/// controller turns it into the fallback reply plus a notification; it is
/// never propagated further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    /// Human-readable cause, including the provider's own message
    pub message: String,
}

impl ServiceError {
    /// Create a new service error from any displayable cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type alias for Planforge operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
