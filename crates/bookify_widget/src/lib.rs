// --- File: crates/bookify_widget/src/lib.rs ---
// Declare modules within this crate
pub mod calendar;
pub mod dates;
#[cfg(test)]
mod dates_proptest;
pub mod flow;
pub mod store;
#[cfg(test)]
mod store_test;
pub mod timezones;

pub use calendar::CalendarView;
pub use dates::{
    format_time, generate_calendar_days, local_date_key, month_grid_range, month_label,
    slot_local_date_key, CalendarDay, TimeFormat,
};
pub use flow::{BookingFlow, BookingStep, CANCEL_RESET_SECONDS};
pub use store::{slots_for_local_date, SlotStore, ViewQuery};
pub use timezones::{available_timezones, TimezoneOption};
