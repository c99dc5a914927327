// --- File: crates/bookify_widget/src/dates.rs ---
//! Pure date and slot helpers for the calendar grid.
//!
//! The provider reports slots as UTC instants bucketed under its own date
//! keys. Which grid cell a slot belongs to is decided here, by rendering the
//! instant in the viewer's timezone, and nowhere else: a slot at 23:30 UTC
//! falls on the next local day east of UTC and the same or previous local
//! day west of it, so the provider key cannot be trusted near midnight.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use bookify_common::models::MonthSlots;

pub const DAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of cells in the rendered grid: 6 full Monday-start weeks.
pub const GRID_CELLS: usize = 42;

/// Preferred clock rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// One cell of the rendered grid. All flags derive from the cell date, the
/// selection, "today" and the set of local dates with availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_current_month: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_slots: bool,
    pub disabled: bool,
}

/// Formats a local calendar date as a zero-padded `YYYY-MM-DD` key.
pub fn local_date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Header label for the month containing `month`, e.g. "June 2025".
pub fn month_label(month: NaiveDate) -> String {
    format!("{} {}", MONTHS[month.month0() as usize], month.year())
}

/// Local calendar date key for a UTC instant rendered in `tz`.
///
/// This is the mandatory path for deciding grid-cell membership of a slot.
/// Returns `None` when the instant cannot be parsed.
pub fn slot_local_date_key(utc_instant: &str, tz: Tz) -> Option<String> {
    let instant = DateTime::parse_from_rfc3339(utc_instant).ok()?;
    Some(local_date_key(instant.with_timezone(&tz).date_naive()))
}

/// The date range covered by the 6-week grid for the month containing
/// `month`: the Monday on or before day 1 through the Sunday on or after the
/// last day of the month. Month fetches are widened to this range so the
/// leading and trailing cells carry availability too.
pub fn month_grid_range(month: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = month.with_day(1).unwrap();
    let last = (first + Months::new(1)).pred_opt().unwrap();

    let start = first - Days::new(u64::from(first.weekday().num_days_from_monday()));
    let end = last + Days::new(u64::from(6 - last.weekday().num_days_from_monday()));
    (start, end)
}

/// Generates the 42 cells for the month containing `month`.
///
/// The availability set is built once by re-bucketing every cached slot into
/// its viewer-local date (O(slots)); each cell then tests membership in O(1).
pub fn generate_calendar_days(
    month: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    month_slots: &MonthSlots,
    tz: Tz,
) -> Vec<CalendarDay> {
    let target_month = month.month();
    let (start, _) = month_grid_range(month);

    let available_dates: HashSet<String> = month_slots
        .values()
        .flatten()
        .filter_map(|slot| slot_local_date_key(&slot.start, tz))
        .collect();

    (0..GRID_CELLS as u64)
        .map(|i| {
            let date = start + Days::new(i);
            let is_current_month = date.month() == target_month;
            let is_past = date < today;
            CalendarDay {
                date,
                day: date.day(),
                is_current_month,
                is_past,
                is_today: date == today,
                is_selected: selected == Some(date),
                has_slots: available_dates.contains(&local_date_key(date)),
                disabled: is_past || !is_current_month,
            }
        })
        .collect()
}

/// Renders an instant as a wall-clock time in `tz`.
///
/// `12h` yields `h:mm AM/PM`, `24h` yields `HH:mm`. An unparseable instant
/// renders as a placeholder so one bad record cannot blank the panel.
pub fn format_time(utc_instant: &str, format: TimeFormat, tz: Tz) -> String {
    match DateTime::parse_from_rfc3339(utc_instant) {
        Ok(instant) => {
            let local = instant.with_timezone(&tz);
            match format {
                TimeFormat::TwelveHour => local.format("%-I:%M %p").to_string(),
                TimeFormat::TwentyFourHour => local.format("%H:%M").to_string(),
            }
        }
        Err(_) => "Invalid Time".to_string(),
    }
}
