// --- File: crates/bookify_widget/src/timezones.rs ---
//! Timezone catalog for the selector: IANA zones with offset labels, coarse
//! region grouping and a stable offset-then-name ordering.
//!
//! Offsets are evaluated at an explicit instant because DST moves them; the
//! selector recomputes the catalog per render, nothing is cached.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};
use serde::{Deserialize, Serialize};

/// One entry of the timezone selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimezoneOption {
    /// IANA zone id, e.g. "Europe/Zurich".
    pub value: String,
    /// Human-readable label, e.g. "Zurich (GMT+02:00)".
    pub label: String,
    /// Coarse continent grouping, e.g. "Europe".
    pub region: String,
}

fn offset_minutes(tz: Tz, at: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

/// Offset label for `tz` at the given instant, as `GMT±HH:MM`.
pub fn timezone_offset_label(tz: Tz, at: DateTime<Utc>) -> String {
    let minutes = offset_minutes(tz, at);
    let sign = if minutes < 0 { '-' } else { '+' };
    format!(
        "GMT{}{:02}:{:02}",
        sign,
        minutes.abs() / 60,
        minutes.abs() % 60
    )
}

/// Maps a zone id to its coarse region grouping.
pub fn region_of(zone_id: &str) -> &'static str {
    if zone_id == "UTC" {
        return "UTC";
    }
    let Some((continent, _)) = zone_id.split_once('/') else {
        return "Other";
    };
    match continent {
        "America" => "Americas",
        "Europe" => "Europe",
        "Asia" => "Asia",
        "Africa" => "Africa",
        "Australia" | "Pacific" => "Oceania",
        "Indian" => "Indian Ocean",
        "Atlantic" => "Atlantic",
        "Antarctica" => "Antarctica",
        _ => "Other",
    }
}

/// Display name for `tz`: the city part of the zone id plus its offset.
pub fn timezone_display_name(tz: Tz, at: DateTime<Utc>) -> String {
    let name = tz.name();
    let city = name.rsplit('/').next().unwrap_or(name).replace('_', " ");
    format!("{} ({})", city, timezone_offset_label(tz, at))
}

fn is_selectable(zone_id: &str) -> bool {
    !zone_id.contains("SystemV")
        && !zone_id.contains("Etc/GMT")
        && (zone_id.contains('/') || zone_id == "UTC")
        && !zone_id.starts_with("US/")
        && !zone_id.starts_with("Canada/")
}

/// The selectable timezones, sorted by UTC offset at `at`, then by label.
pub fn available_timezones_at(at: DateTime<Utc>) -> Vec<TimezoneOption> {
    let mut zones: Vec<(i32, TimezoneOption)> = TZ_VARIANTS
        .iter()
        .filter(|tz| is_selectable(tz.name()))
        .map(|&tz| {
            (
                offset_minutes(tz, at),
                TimezoneOption {
                    value: tz.name().to_string(),
                    label: timezone_display_name(tz, at),
                    region: region_of(tz.name()).to_string(),
                },
            )
        })
        .collect();

    zones.sort_by(|(a_off, a), (b_off, b)| a_off.cmp(b_off).then_with(|| a.label.cmp(&b.label)));
    zones.into_iter().map(|(_, tz)| tz).collect()
}

/// The selectable timezones with offsets evaluated now.
pub fn available_timezones() -> Vec<TimezoneOption> {
    available_timezones_at(Utc::now())
}
