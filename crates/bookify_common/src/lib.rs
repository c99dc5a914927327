// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod models;   // Shared wire models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{external_service_error, BookifyError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
