// --- File: crates/bookify_calcom/src/doc.rs ---
#![allow(dead_code)]

#[cfg(feature = "openapi")]
use crate::handlers::{
    book_handler, cancel_handler, event_types_handler, get_slots_handler, reschedule_handler,
};
#[cfg(feature = "openapi")]
use crate::models::{CancelBookingRequest, CancellationResponse, RescheduleBookingRequest};
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(
        get_slots_handler,
        book_handler,
        cancel_handler,
        reschedule_handler,
        event_types_handler
    ),
    components(
        schemas(CancelBookingRequest, RescheduleBookingRequest, CancellationResponse)
    ),
    tags(
        (name = "Calcom", description = "Cal.com scheduling proxy API")
    )
)]
pub struct CalcomApiDoc;
