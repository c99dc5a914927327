// --- File: crates/bookify_calcom/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

pub use error::CalcomError;
pub use routes::routes;
pub use service::CalcomClient;
