// --- File: crates/bookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Bookify errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for BookifyError.
#[derive(Error, Debug)]
pub enum BookifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookifyError {
    fn status_code(&self) -> u16 {
        match self {
            BookifyError::HttpError(_) => 500,
            BookifyError::ParseError(_) => 400,
            BookifyError::ConfigError(_) => 500,
            BookifyError::ValidationError(_) => 400,
            BookifyError::ExternalServiceError { .. } => 502,
            BookifyError::NotFoundError(_) => 404,
            BookifyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for BookifyError {
    fn from(err: reqwest::Error) -> Self {
        BookifyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BookifyError {
    fn from(err: serde_json::Error) -> Self {
        BookifyError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookifyError {
    BookifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
