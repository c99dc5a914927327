// --- File: crates/bookify_calcom/src/service.rs ---
//! Cal.com v2 API client.
//!
//! One `CalcomClient` per configured account; it implements the common
//! availability and booking service traits so the widget core never sees
//! Cal.com wire details. The API key comes from the `CALCOM_API_KEY` env
//! var, never from a config file.

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use bookify_common::http::client::HTTP_CLIENT;
use bookify_common::models::{BookingRecord, CreateBookingRequest, EventTypeInfo, MonthSlots};
use bookify_common::services::{AvailabilityService, BookingService, BoxFuture, BoxedError};
use bookify_config::CalcomConfig;

use crate::error::CalcomError;
use crate::models::{
    BookingFieldsResponses, CalcomAttendee, CalcomBookingPayload, CalcomCancelPayload,
    CalcomEnvelope, CalcomReschedulePayload, DEFAULT_CANCELLATION_REASON, DEFAULT_NOTES,
    DEFAULT_RESCHEDULED_BY, DEFAULT_RESCHEDULING_REASON,
};

// Cal.com versions its v2 endpoints independently via this header.
const SLOTS_API_VERSION: &str = "2024-09-04";
const BOOKINGS_API_VERSION: &str = "2024-08-13";
const EVENT_TYPES_API_VERSION: &str = "2024-06-14";

pub struct CalcomClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CalcomClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        CalcomClient {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Builds a client from the non-secret config plus the `CALCOM_API_KEY`
    /// env var.
    pub fn from_config(config: &CalcomConfig) -> Result<Self, CalcomError> {
        if config.api_url.is_empty() {
            return Err(CalcomError::ConfigError(
                "Cal.com API URL not configured".to_string(),
            ));
        }
        let api_key = std::env::var("CALCOM_API_KEY")
            .map_err(|_| CalcomError::ConfigError("Cal.com API key not configured".to_string()))?;
        Ok(CalcomClient::new(config.api_url.clone(), api_key))
    }

    fn request(&self, method: Method, path: &str, api_version: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("cal-api-version", api_version)
    }

    /// Unwraps the `{status, data}` envelope every v2 endpoint returns.
    /// An HTTP error relays the provider status; a `status != "success"`
    /// envelope inside an HTTP 200 is treated as a provider-side failure.
    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, CalcomError> {
        let http_status = response.status();
        let body = response.text().await?;

        if !http_status.is_success() {
            error!(status = %http_status, body = %body, "Cal.com API request failed");
            return Err(CalcomError::ApiError {
                status: http_status.as_u16(),
                message: body,
            });
        }

        let envelope: CalcomEnvelope<T> = serde_json::from_str(&body)?;
        if envelope.status == "success" {
            envelope.data.ok_or_else(|| CalcomError::ApiError {
                status: 500,
                message: "Cal.com response missing data".to_string(),
            })
        } else {
            let message = envelope
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| body.clone());
            error!(message = %message, "Cal.com API returned non-success envelope");
            Err(CalcomError::ApiError {
                status: 500,
                message,
            })
        }
    }

    /// Fetch raw availability for `event_type_id` between two provider-side
    /// calendar dates, both inclusive.
    pub async fn get_slots(
        &self,
        event_type_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<MonthSlots, CalcomError> {
        debug!(event_type_id, %date_from, %date_to, "fetching Cal.com slots");
        let response = self
            .request(Method::GET, "/slots", SLOTS_API_VERSION)
            .query(&[
                ("eventTypeId", event_type_id.to_string()),
                ("start", format!("{date_from}T00:00:00.000Z")),
                ("end", format!("{date_to}T23:59:59.999Z")),
            ])
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// Create a booking. Form fields are mirrored into
    /// `bookingFieldsResponses` and the notes field falls back to a fixed
    /// placeholder when left empty.
    pub async fn book(&self, request: &CreateBookingRequest) -> Result<BookingRecord, CalcomError> {
        let notes = if request.notes.trim().is_empty() {
            DEFAULT_NOTES
        } else {
            request.notes.as_str()
        };
        let payload = CalcomBookingPayload {
            start: &request.start,
            attendee: CalcomAttendee {
                name: &request.attendee.name,
                email: &request.attendee.email,
                time_zone: &request.attendee.time_zone,
                language: "en",
            },
            event_type_id: request.event_type_id,
            booking_fields_responses: BookingFieldsResponses {
                name: &request.attendee.name,
                email: &request.attendee.email,
                notes,
                discovery_method: request.referral_source.as_deref(),
            },
            guests: &request.guests,
        };

        debug!(event_type_id = request.event_type_id, start = %request.start, "creating Cal.com booking");
        let response = self
            .request(Method::POST, "/bookings", BOOKINGS_API_VERSION)
            .json(&payload)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// Cancel a booking. The uid goes in the path; the body carries only the
    /// cancellation reason.
    pub async fn cancel(&self, booking_uid: &str, reason: Option<&str>) -> Result<(), CalcomError> {
        let payload = CalcomCancelPayload {
            cancellation_reason: reason.unwrap_or(DEFAULT_CANCELLATION_REASON),
        };
        debug!(booking_uid, "cancelling Cal.com booking");
        let response = self
            .request(
                Method::POST,
                &format!("/bookings/{booking_uid}/cancel"),
                BOOKINGS_API_VERSION,
            )
            .json(&payload)
            .send()
            .await?;
        Self::read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Reschedule a booking to a new start instant.
    pub async fn reschedule(
        &self,
        booking_uid: &str,
        start: &str,
        reason: Option<&str>,
    ) -> Result<BookingRecord, CalcomError> {
        let payload = CalcomReschedulePayload {
            start,
            rescheduled_by: DEFAULT_RESCHEDULED_BY,
            rescheduling_reason: reason.unwrap_or(DEFAULT_RESCHEDULING_REASON),
        };
        debug!(booking_uid, start, "rescheduling Cal.com booking");
        let response = self
            .request(
                Method::POST,
                &format!("/bookings/{booking_uid}/reschedule"),
                BOOKINGS_API_VERSION,
            )
            .json(&payload)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// List the event types configured on the account.
    pub async fn event_types(&self) -> Result<Vec<EventTypeInfo>, CalcomError> {
        let response = self
            .request(Method::GET, "/event-types", EVENT_TYPES_API_VERSION)
            .send()
            .await?;
        Self::read_envelope(response).await
    }
}

fn boxed(err: CalcomError) -> BoxedError {
    BoxedError(Box::new(err))
}

impl AvailabilityService for CalcomClient {
    fn fetch_slots(
        &self,
        event_type_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> BoxFuture<'_, MonthSlots, BoxedError> {
        Box::pin(async move {
            self.get_slots(event_type_id, date_from, date_to)
                .await
                .map_err(boxed)
        })
    }
}

impl BookingService for CalcomClient {
    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, BookingRecord, BoxedError> {
        Box::pin(async move { self.book(&request).await.map_err(boxed) })
    }

    fn cancel_booking(
        &self,
        booking_uid: &str,
        reason: Option<&str>,
    ) -> BoxFuture<'_, (), BoxedError> {
        let booking_uid = booking_uid.to_string();
        let reason = reason.map(str::to_string);
        Box::pin(async move {
            self.cancel(&booking_uid, reason.as_deref())
                .await
                .map_err(boxed)
        })
    }

    fn reschedule_booking(
        &self,
        booking_uid: &str,
        start: &str,
        reason: Option<&str>,
    ) -> BoxFuture<'_, BookingRecord, BoxedError> {
        let booking_uid = booking_uid.to_string();
        let start = start.to_string();
        let reason = reason.map(str::to_string);
        Box::pin(async move {
            self.reschedule(&booking_uid, &start, reason.as_deref())
                .await
                .map_err(boxed)
        })
    }

    fn list_event_types(&self) -> BoxFuture<'_, Vec<EventTypeInfo>, BoxedError> {
        Box::pin(async move { self.event_types().await.map_err(boxed) })
    }
}
