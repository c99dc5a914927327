#[cfg(test)]
mod proptests {
    use crate::dates::{
        generate_calendar_days, local_date_key, month_grid_range, slot_local_date_key, GRID_CELLS,
    };
    use crate::store::slots_for_local_date;
    use bookify_common::models::{MonthSlots, RawSlot};
    use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    // A spread of zones covering west, UTC, half-hour offsets and far east.
    const ZONES: [Tz; 6] = [
        chrono_tz::Pacific::Kiritimati,
        chrono_tz::Asia::Tokyo,
        chrono_tz::Asia::Kolkata,
        chrono_tz::UTC,
        chrono_tz::America::Los_Angeles,
        chrono_tz::Pacific::Pago_Pago,
    ];

    fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
        // 2020-01-01..2035-01-01 expressed in epoch seconds.
        (1_577_836_800i64..2_051_222_400i64)
            .prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn arb_zone() -> impl Strategy<Value = Tz> {
        (0..ZONES.len()).prop_map(|i| ZONES[i])
    }

    fn arb_month() -> impl Strategy<Value = NaiveDate> {
        (2020i32..2035, 1u32..13).prop_map(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap())
    }

    proptest! {
        #[test]
        fn bucketing_matches_wall_clock_date(instant in arb_instant(), tz in arb_zone()) {
            let wire = instant.to_rfc3339();
            let expected = local_date_key(instant.with_timezone(&tz).date_naive());
            prop_assert_eq!(slot_local_date_key(&wire, tz), Some(expected));
        }

        #[test]
        fn grid_shape_holds_for_any_month(month in arb_month(), tz in arb_zone()) {
            let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
            let days = generate_calendar_days(month, None, today, &MonthSlots::new(), tz);
            prop_assert_eq!(days.len(), GRID_CELLS);
            prop_assert_eq!(days[0].date.weekday(), Weekday::Mon);
            prop_assert_eq!(days[GRID_CELLS - 1].date.weekday(), Weekday::Sun);
            for day in &days {
                prop_assert_eq!(day.disabled, day.is_past || !day.is_current_month);
            }
            // Every day of the target month appears exactly once.
            let in_month = days.iter().filter(|d| d.is_current_month).count();
            let (from, to) = month_grid_range(month);
            prop_assert!(from <= month);
            prop_assert!(to >= month);
            prop_assert!(in_month >= 28 && in_month <= 31);
        }

        #[test]
        fn day_resolution_is_sorted_and_on_target(
            instants in proptest::collection::vec(arb_instant(), 0..40),
            tz in arb_zone(),
        ) {
            let mut month_slots = MonthSlots::new();
            for (i, instant) in instants.iter().enumerate() {
                // Scatter slots across arbitrary provider keys to prove the
                // keys are irrelevant to bucketing.
                month_slots
                    .entry(format!("bucket-{}", i % 3))
                    .or_default()
                    .push(RawSlot {
                        start: instant.to_rfc3339(),
                        attendees: Some(i as u32),
                        booking_uid: None,
                    });
            }
            if let Some(first) = instants.first() {
                let target = first.with_timezone(&tz).date_naive();
                let resolved = slots_for_local_date(&month_slots, target, tz);
                prop_assert!(!resolved.is_empty());
                for slot in &resolved {
                    prop_assert_eq!(
                        slot_local_date_key(&slot.start, tz),
                        Some(local_date_key(target))
                    );
                }
                let parsed: Vec<_> = resolved.iter().map(|s| s.instant().unwrap()).collect();
                for pair in parsed.windows(2) {
                    prop_assert!(pair[0] <= pair[1]);
                }
            }
        }
    }
}
