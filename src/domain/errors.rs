//! Domain error types
//!
//! This module defines the error hierarchy for Fairwatt.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Fairwatt error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FairwattError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Metering API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local validation failures, rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested record is not part of the current page or the remote service
    #[error("Not found: {0}")]
    NotFound(String),

    /// Export serialization errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FairwattError {
    /// Returns true for failures rejected locally (empty note, no staff, empty selection)
    pub fn is_validation(&self) -> bool {
        matches!(self, FairwattError::Validation(_))
    }

    /// Message shown to the operator
    ///
    /// Validation failures and server-side validation failures carry their
    /// message verbatim; everything else keeps the full error chain.
    pub fn user_message(&self) -> String {
        match self {
            FairwattError::Validation(msg) => msg.clone(),
            FairwattError::Api(ApiError::UnprocessableEntity { message }) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Metering API errors
///
/// Errors that occur when talking to the remote metering service.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to connect to the service
    #[error("Failed to connect to metering API: {0}")]
    ConnectionFailed(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server-side validation failure (422)
    #[error("Rejected by server: {message}")]
    UnprocessableEntity { message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for FairwattError {
    fn from(err: std::io::Error) -> Self {
        FairwattError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FairwattError {
    fn from(err: serde_json::Error) -> Self {
        FairwattError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FairwattError {
    fn from(err: toml::de::Error) -> Self {
        FairwattError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for FairwattError {
    fn from(err: csv::Error) -> Self {
        FairwattError::Export(format!("CSV writer failed: {err}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for FairwattError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        FairwattError::Export(format!("XLSX writer failed: {err}"))
    }
}
