// --- File: crates/bookify_calcom/src/error.rs ---
use bookify_common::{external_service_error, BookifyError, HttpStatusCode};
use thiserror::Error;

/// Cal.com-specific error types.
#[derive(Error, Debug)]
pub enum CalcomError {
    /// Error occurred during a Cal.com API request
    #[error("Cal.com API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Cal.com API
    #[error("Cal.com API returned an error: status={status}, message='{message}'")]
    ApiError { status: u16, message: String },

    /// Error parsing a Cal.com API response
    #[error("Failed to parse Cal.com API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Cal.com configuration
    #[error("Cal.com configuration missing or incomplete: {0}")]
    ConfigError(String),
}

/// Convert CalcomError to BookifyError
impl From<CalcomError> for BookifyError {
    fn from(err: CalcomError) -> Self {
        match err {
            CalcomError::RequestError(e) => {
                BookifyError::HttpError(format!("Cal.com request error: {e}"))
            }
            CalcomError::ApiError { status, message } => {
                external_service_error("Cal.com API", format!("Status: {status}, Message: {message}"))
            }
            CalcomError::ParseError(e) => {
                BookifyError::ParseError(format!("Cal.com response parse error: {e}"))
            }
            CalcomError::ConfigError(msg) => BookifyError::ConfigError(msg),
        }
    }
}

/// Implement HttpStatusCode for CalcomError so proxy handlers can relay the
/// provider status where one exists.
impl HttpStatusCode for CalcomError {
    fn status_code(&self) -> u16 {
        match self {
            CalcomError::RequestError(_) => 500,
            CalcomError::ApiError { status, .. } => *status,
            CalcomError::ParseError(_) => 500,
            CalcomError::ConfigError(_) => 500,
        }
    }
}
