// --- File: crates/bookify_calcom/src/models.rs ---
//! Wire types for the Cal.com v2 API and the proxy route payloads.

use serde::{Deserialize, Serialize};

// Conditionally import schema derives if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Text used when the form leaves the notes field empty.
pub const DEFAULT_NOTES: &str = "No additional notes provided";
pub const DEFAULT_CANCELLATION_REASON: &str = "User requested cancellation";
pub const DEFAULT_RESCHEDULED_BY: &str = "User";
pub const DEFAULT_RESCHEDULING_REASON: &str = "User requested reschedule";

// --- Proxy route payloads ---

/// Query parameters of the slots proxy route.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct SlotsQuery {
    #[serde(rename = "eventTypeId")]
    #[cfg_attr(feature = "openapi", param(example = 1234))]
    pub event_type_id: Option<String>,
    #[serde(rename = "dateFrom")]
    #[cfg_attr(feature = "openapi", param(example = "2025-06-01"))]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo")]
    #[cfg_attr(feature = "openapi", param(example = "2025-06-30"))]
    pub date_to: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancelBookingRequest {
    #[serde(rename = "bookingUid")]
    pub booking_uid: String,
    #[serde(rename = "cancellationReason", default)]
    pub cancellation_reason: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RescheduleBookingRequest {
    #[serde(rename = "bookingUid")]
    pub booking_uid: String,
    /// New start instant, ISO-8601 UTC.
    pub start: String,
    #[serde(rename = "reschedulingReason", default)]
    pub rescheduling_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

// --- Cal.com v2 wire structures ---

/// Every v2 response wraps its payload in this envelope.
#[derive(Deserialize, Debug)]
pub struct CalcomEnvelope<T> {
    pub status: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CalcomAttendee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(rename = "timeZone")]
    pub time_zone: &'a str,
    pub language: &'a str,
}

/// All form fields must be mirrored into `bookingFieldsResponses`; the v2
/// bookings endpoint ignores custom fields placed anywhere else.
#[derive(Serialize, Debug)]
pub(crate) struct BookingFieldsResponses<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub notes: &'a str,
    #[serde(rename = "discovery-method", skip_serializing_if = "Option::is_none")]
    pub discovery_method: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CalcomBookingPayload<'a> {
    pub start: &'a str,
    pub attendee: CalcomAttendee<'a>,
    #[serde(rename = "eventTypeId")]
    pub event_type_id: i64,
    #[serde(rename = "bookingFieldsResponses")]
    pub booking_fields_responses: BookingFieldsResponses<'a>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub guests: &'a [String],
}

#[derive(Serialize, Debug)]
pub(crate) struct CalcomCancelPayload<'a> {
    #[serde(rename = "cancellationReason")]
    pub cancellation_reason: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct CalcomReschedulePayload<'a> {
    pub start: &'a str,
    #[serde(rename = "rescheduledBy")]
    pub rescheduled_by: &'a str,
    #[serde(rename = "reschedulingReason")]
    pub rescheduling_reason: &'a str,
}
