// --- File: crates/bookify_common/src/services.rs ---
//! Service abstractions for the external scheduling provider.
//!
//! These traits decouple the widget core from the concrete Cal.com client,
//! allowing the slot store and booking flow to be exercised against small
//! in-memory fakes in tests.

use chrono::NaiveDate;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{BookingRecord, CreateBookingRequest, EventTypeInfo, MonthSlots};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Read side of the provider: availability for a date range.
pub trait AvailabilityService: Send + Sync {
    /// Fetch raw availability for an event type between `date_from` and
    /// `date_to` (both inclusive, provider-side calendar dates).
    fn fetch_slots(
        &self,
        event_type_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> BoxFuture<'_, MonthSlots, BoxedError>;
}

/// Write side of the provider: create, cancel and reschedule bookings.
pub trait BookingService: Send + Sync {
    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, BookingRecord, BoxedError>;

    fn cancel_booking(
        &self,
        booking_uid: &str,
        reason: Option<&str>,
    ) -> BoxFuture<'_, (), BoxedError>;

    fn reschedule_booking(
        &self,
        booking_uid: &str,
        start: &str,
        reason: Option<&str>,
    ) -> BoxFuture<'_, BookingRecord, BoxedError>;

    fn list_event_types(&self) -> BoxFuture<'_, Vec<EventTypeInfo>, BoxedError>;
}
