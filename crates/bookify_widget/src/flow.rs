// --- File: crates/bookify_widget/src/flow.rs ---
//! The booking flow state machine: calendar, form, success, reschedule and
//! cancelled steps, plus the provider calls that move between them.
//!
//! Cancel and reschedule both require an explicit second confirmation before
//! any request is issued. Their failures never lose the booking: the step
//! stays where it was and the viewer is pointed at the self-service link in
//! the confirmation email.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{error, info};

use bookify_common::models::{Attendee, BookingFormData, BookingRecord, CreateBookingRequest};
use bookify_common::services::BookingService;

/// Seconds the cancelled notice stays on screen before resetting.
pub const CANCEL_RESET_SECONDS: u8 = 5;

const CANCEL_REASON: &str = "Cancelled by user";
const RESCHEDULE_REASON: &str = "User requested reschedule";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Calendar,
    Form,
    Success,
    Reschedule,
    Cancelled,
}

pub struct BookingFlow {
    provider: Arc<dyn BookingService>,
    event_type_id: i64,
    event_length_minutes: i64,
    step: BookingStep,
    /// Start instant of the slot the viewer picked, ISO-8601 UTC.
    selected_slot: Option<String>,
    booking: Option<BookingRecord>,
    is_rescheduled: bool,
    /// Slot picked during reschedule, awaiting modal confirmation.
    pending_reschedule_slot: Option<String>,
    cancel_countdown: u8,
    error_message: Option<String>,
}

impl BookingFlow {
    pub fn new(
        provider: Arc<dyn BookingService>,
        event_type_id: i64,
        event_length_minutes: i64,
    ) -> Self {
        BookingFlow {
            provider,
            event_type_id,
            event_length_minutes,
            step: BookingStep::Calendar,
            selected_slot: None,
            booking: None,
            is_rescheduled: false,
            pending_reschedule_slot: None,
            cancel_countdown: CANCEL_RESET_SECONDS,
            error_message: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn booking(&self) -> Option<&BookingRecord> {
        self.booking.as_ref()
    }

    pub fn is_rescheduled(&self) -> bool {
        self.is_rescheduled
    }

    pub fn pending_reschedule_slot(&self) -> Option<&str> {
        self.pending_reschedule_slot.as_deref()
    }

    pub fn cancel_countdown(&self) -> u8 {
        self.cancel_countdown
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// End instant of the selected slot: start plus the event length.
    pub fn meeting_end(&self) -> Option<DateTime<Utc>> {
        let start = DateTime::parse_from_rfc3339(self.selected_slot.as_deref()?).ok()?;
        Some(start.with_timezone(&Utc) + Duration::minutes(self.event_length_minutes))
    }

    /// Picks a slot in the calendar step and advances to the form.
    pub fn select_slot(&mut self, slot: String) {
        if self.step != BookingStep::Calendar {
            return;
        }
        self.selected_slot = Some(slot);
        self.step = BookingStep::Form;
    }

    /// Leaves the form without booking.
    pub fn back_to_calendar(&mut self) {
        if self.step != BookingStep::Form {
            return;
        }
        self.selected_slot = None;
        self.step = BookingStep::Calendar;
    }

    /// Submits the form. Success advances to the success step; failure keeps
    /// the form with a message so nothing the viewer typed is lost.
    pub async fn submit_booking(&mut self, form: BookingFormData, timezone: &str) {
        if self.step != BookingStep::Form {
            return;
        }
        let Some(start) = self.selected_slot.clone() else {
            return;
        };

        let request = CreateBookingRequest {
            event_type_id: self.event_type_id,
            start,
            attendee: Attendee {
                name: form.name,
                email: form.email,
                time_zone: timezone.to_string(),
            },
            notes: form.notes,
            referral_source: form.referral_source,
            guests: form.guests,
        };

        match self.provider.create_booking(request).await {
            Ok(booking) => {
                info!(uid = %booking.uid, "booking created");
                self.booking = Some(booking);
                self.is_rescheduled = false;
                self.error_message = None;
                self.step = BookingStep::Success;
            }
            Err(err) => {
                error!(error = %err, "failed to create booking");
                self.error_message =
                    Some("Failed to book the meeting. Please try again.".to_string());
            }
        }
    }

    /// Re-enters the calendar in pick-a-new-slot mode, keeping the booking.
    pub fn begin_reschedule(&mut self) {
        if self.step != BookingStep::Success {
            return;
        }
        self.step = BookingStep::Reschedule;
    }

    /// Stores the newly picked slot until the viewer confirms in the modal.
    pub fn select_reschedule_slot(&mut self, slot: String) {
        if self.step != BookingStep::Reschedule {
            return;
        }
        self.pending_reschedule_slot = Some(slot);
    }

    /// Dismisses the reschedule confirmation without issuing a request.
    pub fn dismiss_reschedule(&mut self) {
        self.pending_reschedule_slot = None;
    }

    /// Issues the reschedule request for the pending slot.
    pub async fn confirm_reschedule(&mut self) {
        let Some(uid) = self.booking.as_ref().map(|b| b.uid.clone()) else {
            return;
        };
        let Some(start) = self.pending_reschedule_slot.take() else {
            return;
        };

        match self
            .provider
            .reschedule_booking(&uid, &start, Some(RESCHEDULE_REASON))
            .await
        {
            Ok(booking) => {
                info!(uid = %booking.uid, "booking rescheduled");
                self.booking = Some(booking);
                self.is_rescheduled = true;
                self.error_message = None;
                self.step = BookingStep::Success;
            }
            Err(err) => {
                error!(error = %err, "failed to reschedule booking");
                self.error_message = Some(
                    "Failed to reschedule the meeting. Please use the rescheduling link in \
                     your booking confirmation email to reschedule this meeting."
                        .to_string(),
                );
            }
        }
    }

    /// Issues the cancel request. Requires the viewer to have confirmed.
    pub async fn confirm_cancel(&mut self) {
        if self.step != BookingStep::Success {
            return;
        }
        let Some(uid) = self.booking.as_ref().map(|b| b.uid.clone()) else {
            return;
        };

        match self.provider.cancel_booking(&uid, Some(CANCEL_REASON)).await {
            Ok(()) => {
                info!(uid = %uid, "booking cancelled");
                self.error_message = None;
                self.cancel_countdown = CANCEL_RESET_SECONDS;
                self.step = BookingStep::Cancelled;
            }
            Err(err) => {
                error!(error = %err, "failed to cancel booking");
                self.error_message = Some(
                    "Failed to cancel the meeting. Please use the cancellation link in \
                     your booking confirmation email to cancel this meeting."
                        .to_string(),
                );
            }
        }
    }

    /// Advances the cancelled-notice countdown by one second. Reaching zero
    /// resets the flow to a fresh calendar.
    pub fn tick(&mut self) {
        if self.step != BookingStep::Cancelled {
            return;
        }
        self.cancel_countdown = self.cancel_countdown.saturating_sub(1);
        if self.cancel_countdown == 0 {
            self.reset();
        }
    }

    /// Starts over: "book another meeting".
    pub fn new_booking(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.step = BookingStep::Calendar;
        self.selected_slot = None;
        self.booking = None;
        self.is_rescheduled = false;
        self.pending_reschedule_slot = None;
        self.cancel_countdown = CANCEL_RESET_SECONDS;
        self.error_message = None;
    }
}
