use bookify_common::models::{MonthSlots, RawSlot};
use bookify_widget::{generate_calendar_days, slots_for_local_date};
use chrono::NaiveDate;
use chrono_tz::Tz;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Helper function to build a month of raw availability with `per_day` slots
// on each of the month's days
fn create_month_slots(year: i32, month: u32, days: u32, per_day: usize) -> MonthSlots {
    let mut slots = MonthSlots::new();
    for day in 1..=days {
        let key = format!("{year:04}-{month:02}-{day:02}");
        let starts = (0..per_day)
            .map(|i| RawSlot {
                start: format!(
                    "{year:04}-{month:02}-{day:02}T{:02}:{:02}:00Z",
                    8 + (i / 4) % 10,
                    (i % 4) * 15
                ),
                attendees: None,
                booking_uid: None,
            })
            .collect();
        slots.insert(key, starts);
    }
    slots
}

fn benchmark_generate_calendar_days(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_calendar_days");

    let month = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
    let selected = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();

    // Benchmark with no availability at all
    group.bench_function("empty_month", |b| {
        let slots = MonthSlots::new();
        b.iter(|| {
            generate_calendar_days(
                black_box(month),
                black_box(Some(selected)),
                black_box(today),
                black_box(&slots),
                black_box(Tz::Europe__Zurich),
            )
        })
    });

    // Benchmark with a lightly booked month
    group.bench_function("sparse_month", |b| {
        let slots = create_month_slots(2025, 6, 30, 4);
        b.iter(|| {
            generate_calendar_days(
                black_box(month),
                black_box(Some(selected)),
                black_box(today),
                black_box(&slots),
                black_box(Tz::Europe__Zurich),
            )
        })
    });

    // Benchmark with a fully booked month (32 slots per day)
    group.bench_function("dense_month", |b| {
        let slots = create_month_slots(2025, 6, 30, 32);
        b.iter(|| {
            generate_calendar_days(
                black_box(month),
                black_box(Some(selected)),
                black_box(today),
                black_box(&slots),
                black_box(Tz::Europe__Zurich),
            )
        })
    });

    // Benchmark with a timezone far from UTC, where every slot shifts days
    group.bench_function("dense_month_offset_zone", |b| {
        let slots = create_month_slots(2025, 6, 30, 32);
        b.iter(|| {
            generate_calendar_days(
                black_box(month),
                black_box(Some(selected)),
                black_box(today),
                black_box(&slots),
                black_box(Tz::Pacific__Kiritimati),
            )
        })
    });

    group.finish();
}

fn benchmark_slots_for_local_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("slots_for_local_date");

    let date = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();

    // Benchmark resolving one day out of a dense month cache
    group.bench_function("dense_month", |b| {
        let slots = create_month_slots(2025, 6, 30, 32);
        b.iter(|| {
            slots_for_local_date(
                black_box(&slots),
                black_box(date),
                black_box(Tz::Europe__Zurich),
            )
        })
    });

    // Benchmark the worst case: every slot parses but none matches
    group.bench_function("dense_month_no_match", |b| {
        let slots = create_month_slots(2025, 1, 31, 32);
        b.iter(|| {
            slots_for_local_date(
                black_box(&slots),
                black_box(date),
                black_box(Tz::Europe__Zurich),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generate_calendar_days,
    benchmark_slots_for_local_date
);
criterion_main!(benches);
