// --- File: crates/bookify_calcom/src/handlers.rs ---
//! Axum proxy handlers in front of the Cal.com client.
//!
//! The proxy exists so the API key never reaches a browser: routes validate
//! input, forward to the client and relay provider errors with their status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;
use tracing::warn;

use bookify_common::models::{BookingRecord, CreateBookingRequest, EventTypeInfo, MonthSlots};
use bookify_common::HttpStatusCode;
use bookify_config::AppConfig;

use crate::error::CalcomError;
use crate::models::{
    CancelBookingRequest, CancellationResponse, RescheduleBookingRequest, SlotsQuery,
};
use crate::service::CalcomClient;

// Shared state for the Cal.com handlers. The client is `None` when the API
// key or URL is missing at startup; handlers then answer with a config
// error before issuing any network call.
#[derive(Clone)]
pub struct CalcomState {
    pub config: Arc<AppConfig>,
    pub client: Option<Arc<CalcomClient>>,
}

fn require_client(state: &CalcomState) -> Result<&Arc<CalcomClient>, (StatusCode, String)> {
    state.client.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Cal.com API key not configured".to_string(),
        )
    })
}

/// Maps a client error onto the response: provider statuses are relayed,
/// everything else is a 500.
fn relay_error(err: CalcomError) -> (StatusCode, String) {
    warn!(error = %err, "Cal.com proxy request failed");
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    let message = match err {
        CalcomError::ApiError { message, .. } => message,
        other => other.to_string(),
    };
    (status, message)
}

fn parse_date(value: &str, name: &str) -> Result<NaiveDate, (StatusCode, String)> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {name} format (YYYY-MM-DD)"),
        )
    })
}

/// Handler to fetch raw availability for a date range.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calcom/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Raw availability keyed by provider-side date"),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 500, description = "Configuration error or provider failure")
    ),
    tag = "Calcom"
))]
pub async fn get_slots_handler(
    State(state): State<Arc<CalcomState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<MonthSlots>, (StatusCode, String)> {
    let (Some(event_type_id), Some(date_from), Some(date_to)) =
        (&query.event_type_id, &query.date_from, &query.date_to)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required parameters: eventTypeId, dateFrom, dateTo".to_string(),
        ));
    };

    let event_type_id: i64 = event_type_id.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid eventTypeId: must be a valid positive number".to_string(),
        )
    })?;
    if event_type_id <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid eventTypeId: must be a valid positive number".to_string(),
        ));
    }

    let date_from = parse_date(date_from, "dateFrom")?;
    let date_to = parse_date(date_to, "dateTo")?;
    if date_to < date_from {
        return Err((
            StatusCode::BAD_REQUEST,
            "dateTo must not be before dateFrom".to_string(),
        ));
    }

    let client = require_client(&state)?;
    let slots = client
        .get_slots(event_type_id, date_from, date_to)
        .await
        .map_err(relay_error)?;
    Ok(Json(slots))
}

/// Handler to create a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calcom/book",
    responses(
        (status = 200, description = "Booking created"),
        (status = 400, description = "Missing or malformed booking data"),
        (status = 500, description = "Configuration error or provider failure")
    ),
    tag = "Calcom"
))]
pub async fn book_handler(
    State(state): State<Arc<CalcomState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingRecord>, (StatusCode, String)> {
    if payload.event_type_id <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid eventTypeId: must be a valid positive number".to_string(),
        ));
    }
    if DateTime::parse_from_rfc3339(&payload.start).is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid start format (ISO-8601)".to_string(),
        ));
    }
    if payload.attendee.name.trim().is_empty() || payload.attendee.email.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required booking data".to_string(),
        ));
    }

    let client = require_client(&state)?;
    let booking = client.book(&payload).await.map_err(relay_error)?;
    Ok(Json(booking))
}

/// Handler to cancel a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calcom/cancel",
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Booking cancelled", body = CancellationResponse),
        (status = 400, description = "Missing bookingUid"),
        (status = 500, description = "Configuration error or provider failure")
    ),
    tag = "Calcom"
))]
pub async fn cancel_handler(
    State(state): State<Arc<CalcomState>>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    if payload.booking_uid.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required field: bookingUid".to_string(),
        ));
    }

    let client = require_client(&state)?;
    client
        .cancel(
            &payload.booking_uid,
            payload.cancellation_reason.as_deref(),
        )
        .await
        .map_err(relay_error)?;
    Ok(Json(CancellationResponse {
        success: true,
        message: "Booking cancelled successfully.".to_string(),
    }))
}

/// Handler to reschedule a booking to a new start instant.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calcom/reschedule",
    request_body = RescheduleBookingRequest,
    responses(
        (status = 200, description = "Booking rescheduled"),
        (status = 400, description = "Missing bookingUid or start"),
        (status = 500, description = "Configuration error or provider failure")
    ),
    tag = "Calcom"
))]
pub async fn reschedule_handler(
    State(state): State<Arc<CalcomState>>,
    Json(payload): Json<RescheduleBookingRequest>,
) -> Result<Json<BookingRecord>, (StatusCode, String)> {
    if payload.booking_uid.trim().is_empty() || payload.start.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required fields: bookingUid and start time".to_string(),
        ));
    }
    if DateTime::parse_from_rfc3339(&payload.start).is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid start format (ISO-8601)".to_string(),
        ));
    }

    let client = require_client(&state)?;
    let booking = client
        .reschedule(
            &payload.booking_uid,
            &payload.start,
            payload.rescheduling_reason.as_deref(),
        )
        .await
        .map_err(relay_error)?;
    Ok(Json(booking))
}

/// Handler to list the configured event types.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calcom/event-types",
    responses(
        (status = 200, description = "Event types configured on the account"),
        (status = 500, description = "Configuration error or provider failure")
    ),
    tag = "Calcom"
))]
pub async fn event_types_handler(
    State(state): State<Arc<CalcomState>>,
) -> Result<Json<Vec<EventTypeInfo>>, (StatusCode, String)> {
    let client = require_client(&state)?;
    let event_types = client.event_types().await.map_err(relay_error)?;
    Ok(Json(event_types))
}
