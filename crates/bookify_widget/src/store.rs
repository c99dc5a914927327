// --- File: crates/bookify_widget/src/store.rs ---
//! The slot store: owns the cached month availability and the resolved
//! per-day time list, and mediates between the calendar view and the
//! provider's availability endpoint.
//!
//! Requests are fenced with epoch tickets: every fetch claims a ticket when
//! it is issued, and a completion whose ticket is no longer current is
//! discarded. Without the fence a slow month fetch finishing after a faster
//! one could overwrite fresher state (last-completion-wins).

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use bookify_common::models::{MonthSlots, Slot};
use bookify_common::services::AvailabilityService;

use crate::dates::{local_date_key, month_grid_range, slot_local_date_key};

/// The view-state parameters a fetch is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub event_type_id: i64,
    /// Any date inside the displayed month.
    pub month: NaiveDate,
    pub timezone: Tz,
}

#[derive(Default)]
struct SlotState {
    month_slots: MonthSlots,
    available_slots: Vec<Slot>,
    loading: bool,
}

/// Month-level and day-level availability state for one widget instance.
pub struct SlotStore {
    provider: Arc<dyn AvailabilityService>,
    state: RwLock<SlotState>,
    month_epoch: AtomicU64,
    day_epoch: AtomicU64,
}

/// Collects the slots of one raw provider response that fall on `date` when
/// rendered in `tz`, sorted ascending by instant. Unparseable starts sort
/// last; provider ordering within a key is not trusted.
pub fn slots_for_local_date(month_slots: &MonthSlots, date: NaiveDate, tz: Tz) -> Vec<Slot> {
    let target = local_date_key(date);
    let mut matches: Vec<Slot> = month_slots
        .values()
        .flatten()
        .filter(|slot| slot_local_date_key(&slot.start, tz).as_deref() == Some(target.as_str()))
        .map(Slot::from_raw)
        .collect();
    matches.sort_by_key(|slot| slot.instant().unwrap_or(DateTime::<Utc>::MAX_UTC));
    matches
}

impl SlotStore {
    pub fn new(provider: Arc<dyn AvailabilityService>) -> Self {
        SlotStore {
            provider,
            state: RwLock::new(SlotState::default()),
            month_epoch: AtomicU64::new(0),
            day_epoch: AtomicU64::new(0),
        }
    }

    /// The cached raw month availability.
    pub fn month_slots(&self) -> MonthSlots {
        self.state.read().expect("slot state poisoned").month_slots.clone()
    }

    /// The resolved time list for the most recently requested day.
    pub fn available_slots(&self) -> Vec<Slot> {
        self.state
            .read()
            .expect("slot state poisoned")
            .available_slots
            .clone()
    }

    /// True while a day-level resolution is in flight.
    pub fn loading(&self) -> bool {
        self.state.read().expect("slot state poisoned").loading
    }

    /// Fetches availability for the full 6-week grid around `query.month`
    /// and replaces the cached month wholesale.
    ///
    /// On failure the cache is reset to empty: stale availability could let
    /// a viewer pick a slot that has since vanished, so the degraded state
    /// is "no slots", not silently wrong slots. No retry is attempted.
    pub async fn fetch_month_slots(&self, query: &ViewQuery) {
        let ticket = self.month_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let (date_from, date_to) = month_grid_range(query.month);

        let result = self
            .provider
            .fetch_slots(query.event_type_id, date_from, date_to)
            .await;

        if self.month_epoch.load(Ordering::SeqCst) != ticket {
            debug!(
                month = %query.month,
                "discarding month availability superseded by a newer fetch"
            );
            return;
        }

        let mut state = self.state.write().expect("slot state poisoned");
        match result {
            Ok(slots) => state.month_slots = slots,
            Err(err) => {
                warn!(error = %err, "failed to fetch month availability, clearing cache");
                state.month_slots = MonthSlots::new();
            }
        }
    }

    /// Resolves the time list for one viewer-local date.
    ///
    /// Fast path: re-bucket the cached month through the viewer timezone and
    /// collect matches. If that yields nothing, fetch the day plus one
    /// calendar day on each side (timezone skew never exceeds 24 hours) and
    /// bucket the response the same way. Failures resolve to an empty list.
    pub async fn fetch_slots(&self, query: &ViewQuery, date: NaiveDate) -> Vec<Slot> {
        let ticket = self.day_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().expect("slot state poisoned").loading = true;

        let cached = {
            let state = self.state.read().expect("slot state poisoned");
            slots_for_local_date(&state.month_slots, date, query.timezone)
        };

        let resolved = if !cached.is_empty() {
            cached
        } else {
            let date_from = date - Days::new(1);
            let date_to = date + Days::new(1);
            match self
                .provider
                .fetch_slots(query.event_type_id, date_from, date_to)
                .await
            {
                Ok(slots) => slots_for_local_date(&slots, date, query.timezone),
                Err(err) => {
                    warn!(error = %err, date = %date, "failed to fetch day availability");
                    Vec::new()
                }
            }
        };

        let mut state = self.state.write().expect("slot state poisoned");
        if self.day_epoch.load(Ordering::SeqCst) == ticket {
            state.available_slots = resolved.clone();
            state.loading = false;
        } else {
            debug!(date = %date, "discarding day availability superseded by a newer fetch");
        }
        resolved
    }
}
