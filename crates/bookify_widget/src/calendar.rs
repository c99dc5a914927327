// --- File: crates/bookify_widget/src/calendar.rs ---
//! Calendar view state: month cursor, selected date, viewer timezone and the
//! visibility gate. Drives the slot store and produces the day grid plus
//! time panel data for rendering.

use chrono::{Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

use bookify_common::models::Slot;

use crate::dates::{generate_calendar_days, month_label, CalendarDay, TimeFormat, DAYS};
use crate::store::{SlotStore, ViewQuery};

pub struct CalendarView {
    store: Arc<SlotStore>,
    event_type_id: i64,
    timezone: Tz,
    time_format: TimeFormat,
    /// First day of the displayed month.
    current_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    /// Fetches are gated until the widget has scrolled near-into-view, so a
    /// below-the-fold widget issues no calls.
    visible: bool,
    /// One-shot: today is auto-highlighted at most once, and never after the
    /// viewer has navigated or selected explicitly.
    auto_select_spent: bool,
}

impl CalendarView {
    pub fn new(store: Arc<SlotStore>, event_type_id: i64, timezone: Tz) -> Self {
        let today = Utc::now().with_timezone(&timezone).date_naive();
        CalendarView {
            store,
            event_type_id,
            timezone,
            time_format: TimeFormat::TwelveHour,
            current_month: today.with_day(1).unwrap(),
            selected_date: None,
            visible: false,
            auto_select_spent: false,
        }
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    /// Header label for the displayed month, e.g. "June 2025".
    pub fn month_label(&self) -> String {
        month_label(self.current_month)
    }

    /// Column headers for the Monday-start grid.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        DAYS
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.time_format = format;
    }

    pub fn available_slots(&self) -> Vec<Slot> {
        self.store.available_slots()
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    fn view_query(&self) -> ViewQuery {
        ViewQuery {
            event_type_id: self.event_type_id,
            month: self.current_month,
            timezone: self.timezone,
        }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// The 42 cells of the displayed month.
    pub fn days(&self) -> Vec<CalendarDay> {
        generate_calendar_days(
            self.current_month,
            self.selected_date,
            self.today(),
            &self.store.month_slots(),
            self.timezone,
        )
    }

    /// Marks the widget as scrolled near-into-view. The first call triggers
    /// the initial month fetch; later calls are no-ops.
    pub async fn mark_visible(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.refresh_month().await;
    }

    async fn refresh_month(&mut self) {
        if !self.visible {
            return;
        }
        self.store.fetch_month_slots(&self.view_query()).await;
        self.maybe_auto_select_today().await;
    }

    /// Highlights today once the first month data arrives, provided nothing
    /// has been selected yet and the viewer has not navigated away.
    async fn maybe_auto_select_today(&mut self) {
        if self.auto_select_spent || self.selected_date.is_some() {
            return;
        }
        if self.store.month_slots().is_empty() {
            return;
        }
        self.auto_select_spent = true;
        let today = self.today();
        self.selected_date = Some(today);
        self.store.fetch_slots(&self.view_query(), today).await;
    }

    /// Moves the cursor to the month containing `month` and refetches.
    /// The previously selected date is kept.
    pub async fn go_to_month(&mut self, month: NaiveDate) {
        self.auto_select_spent = true;
        self.current_month = month.with_day(1).unwrap();
        self.refresh_month().await;
    }

    pub async fn previous_month(&mut self) {
        self.go_to_month(self.current_month - Months::new(1)).await;
    }

    pub async fn next_month(&mut self) {
        self.go_to_month(self.current_month + Months::new(1)).await;
    }

    /// Selects a day and resolves its time list. Selecting a disabled cell
    /// (past, or outside the displayed month) is a no-op.
    pub async fn select_date(&mut self, date: NaiveDate) {
        let disabled = date < self.today() || date.with_day(1) != Some(self.current_month);
        if disabled {
            return;
        }
        self.auto_select_spent = true;
        self.selected_date = Some(date);
        self.store.fetch_slots(&self.view_query(), date).await;
    }

    /// Switches the event type being booked. Availability is per event type,
    /// so the cached month data is stale: the month is refetched and the
    /// selected day's time list re-resolved.
    pub async fn set_event_type(&mut self, event_type_id: i64) {
        self.event_type_id = event_type_id;
        if !self.visible {
            return;
        }
        self.store.fetch_month_slots(&self.view_query()).await;
        if let Some(date) = self.selected_date {
            self.store.fetch_slots(&self.view_query(), date).await;
        }
    }

    /// Switches the viewer timezone. The same instants bucket into different
    /// local dates under the new zone, so month data is refetched and the
    /// selected day's list re-resolved rather than re-rendered from state
    /// computed under the old zone.
    pub async fn set_timezone(&mut self, timezone: Tz) {
        self.timezone = timezone;
        if !self.visible {
            return;
        }
        self.store.fetch_month_slots(&self.view_query()).await;
        if let Some(date) = self.selected_date {
            self.store.fetch_slots(&self.view_query(), date).await;
        }
    }
}
