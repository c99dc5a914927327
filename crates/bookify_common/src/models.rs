// --- File: crates/bookify_common/src/models.rs ---
//! Wire models shared between the widget core and the provider client.
//!
//! These mirror the Cal.com v2 payload shapes. Instants stay ISO-8601
//! strings at this layer; they are parsed where an absolute ordering or a
//! local rendering is needed, so one malformed record degrades to a
//! placeholder instead of failing a whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bookable instant as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSlot {
    /// Absolute UTC instant, ISO-8601.
    pub start: String,
    /// Attendees already on this slot. Carried through, never used to block
    /// selection (capacity is enforced provider-side).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
    /// Present only for slots backing an existing booking (reschedule flows).
    #[serde(
        rename = "bookingUid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_uid: Option<String>,
}

/// Raw provider output for one fetched range: provider date key to the slots
/// the provider bucketed under that key. The keys use the provider's own
/// date bucketing and must never decide which grid cell a slot lands in.
pub type MonthSlots = BTreeMap<String, Vec<RawSlot>>;

/// A slot resolved for display: still an ISO-8601 start plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub start: String,
    pub attendees: u32,
    #[serde(
        rename = "bookingUid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_uid: Option<String>,
}

impl Slot {
    pub fn from_raw(raw: &RawSlot) -> Self {
        Slot {
            start: raw.start.clone(),
            attendees: raw.attendees.unwrap_or(0),
            booking_uid: raw.booking_uid.clone(),
        }
    }

    /// The slot's start as an absolute instant, if parseable.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The person booking the meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// Everything the booking form collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFormData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guests: Vec<String>,
    #[serde(
        rename = "referralSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub referral_source: Option<String>,
}

/// A fully specified create-booking request, ready for the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(rename = "eventTypeId")]
    pub event_type_id: i64,
    /// Start instant, ISO-8601 UTC.
    pub start: String,
    pub attendee: Attendee,
    #[serde(default)]
    pub notes: String,
    #[serde(
        rename = "referralSource",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub referral_source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guests: Vec<String>,
}

/// One attendee on a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingAttendee {
    pub name: String,
    pub email: String,
}

/// The booking record the provider returns from create and reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: serde_json::Value,
    pub uid: String,
    #[serde(default)]
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub attendees: Vec<BookingAttendee>,
}

/// One configured event type on the provider account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeInfo {
    pub id: serde_json::Value,
    pub title: String,
    pub slug: String,
    /// Length in minutes.
    #[serde(rename = "lengthInMinutes", alias = "length")]
    pub length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
