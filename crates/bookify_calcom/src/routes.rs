// --- File: crates/bookify_calcom/src/routes.rs ---

use crate::handlers::{
    book_handler, cancel_handler, event_types_handler, get_slots_handler, reschedule_handler,
    CalcomState,
};
use crate::service::CalcomClient;
use axum::{
    routing::{get, post},
    Router,
};
use bookify_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the Cal.com proxy.
///
/// A missing API key or URL does not fail startup: the routes are mounted
/// and answer with a configuration error, matching the per-request checks
/// the handlers do.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let client = config
        .calcom
        .as_ref()
        .and_then(|calcom| match CalcomClient::from_config(calcom) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                warn!(error = %err, "Cal.com client unavailable, proxy routes will report a config error");
                None
            }
        });

    let state = Arc::new(CalcomState { config, client });

    Router::new()
        .route("/calcom/slots", get(get_slots_handler))
        .route("/calcom/book", post(book_handler))
        .route("/calcom/cancel", post(cancel_handler))
        .route("/calcom/reschedule", post(reschedule_handler))
        .route("/calcom/event-types", get(event_types_handler))
        .with_state(state)
}
