#[cfg(test)]
mod tests {
    use crate::store::{slots_for_local_date, SlotStore, ViewQuery};
    use bookify_common::models::{MonthSlots, RawSlot};
    use bookify_common::services::{AvailabilityService, BoxFuture, BoxedError};
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(start: &str) -> RawSlot {
        RawSlot {
            start: start.to_string(),
            attendees: None,
            booking_uid: None,
        }
    }

    fn month_of(key: &str, starts: &[&str]) -> MonthSlots {
        let mut slots = MonthSlots::new();
        slots.insert(key.to_string(), starts.iter().map(|s| raw(s)).collect());
        slots
    }

    fn june_query(tz: Tz) -> ViewQuery {
        ViewQuery {
            event_type_id: 1234,
            month: date(2025, 6, 1),
            timezone: tz,
        }
    }

    /// Serves queued responses in order and records the requested ranges.
    #[derive(Default)]
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<MonthSlots, String>>>,
        calls: Mutex<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl ScriptedProvider {
        fn push_ok(&self, slots: MonthSlots) {
            self.responses.lock().unwrap().push_back(Ok(slots));
        }

        fn push_err(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
        }

        fn calls(&self) -> Vec<(NaiveDate, NaiveDate)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AvailabilityService for ScriptedProvider {
        fn fetch_slots(
            &self,
            _event_type_id: i64,
            date_from: NaiveDate,
            date_to: NaiveDate,
        ) -> BoxFuture<'_, MonthSlots, BoxedError> {
            self.calls.lock().unwrap().push((date_from, date_to));
            let next = self.responses.lock().unwrap().pop_front();
            Box::pin(async move {
                match next {
                    Some(Ok(slots)) => Ok(slots),
                    Some(Err(message)) => Err(BoxedError(message.into())),
                    None => Ok(MonthSlots::new()),
                }
            })
        }
    }

    /// Blocks its first call on a gate so the test can interleave a second,
    /// faster request before the first completes.
    struct GatedProvider {
        calls: AtomicUsize,
        first_started: Notify,
        gate: Notify,
        slow: MonthSlots,
        fast: MonthSlots,
    }

    impl AvailabilityService for GatedProvider {
        fn fetch_slots(
            &self,
            _event_type_id: i64,
            _date_from: NaiveDate,
            _date_to: NaiveDate,
        ) -> BoxFuture<'_, MonthSlots, BoxedError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if call == 0 {
                    self.first_started.notify_one();
                    self.gate.notified().await;
                    Ok(self.slow.clone())
                } else {
                    Ok(self.fast.clone())
                }
            })
        }
    }

    #[tokio::test]
    async fn month_fetch_covers_the_widened_grid_range() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(month_of("2025-06-17", &["2025-06-17T10:00:00Z"]));
        let store = SlotStore::new(provider.clone());

        store.fetch_month_slots(&june_query(chrono_tz::UTC)).await;

        // Monday before June 1 through Sunday after June 30.
        assert_eq!(
            provider.calls(),
            vec![(date(2025, 5, 26), date(2025, 7, 6))]
        );
        assert_eq!(store.month_slots().len(), 1);
    }

    #[tokio::test]
    async fn month_fetch_failure_clears_the_cache() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(month_of("2025-06-17", &["2025-06-17T10:00:00Z"]));
        provider.push_err("availability endpoint returned HTTP 500");
        let store = SlotStore::new(provider.clone());
        let query = june_query(chrono_tz::UTC);

        store.fetch_month_slots(&query).await;
        assert!(!store.month_slots().is_empty());

        store.fetch_month_slots(&query).await;
        assert!(store.month_slots().is_empty(), "stale data must not survive");
    }

    #[tokio::test]
    async fn month_fetch_is_idempotent_for_unchanged_upstream() {
        let data = month_of("2025-06-17", &["2025-06-17T10:00:00Z"]);
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(data.clone());
        provider.push_ok(data.clone());
        let store = SlotStore::new(provider);
        let query = june_query(chrono_tz::UTC);

        store.fetch_month_slots(&query).await;
        let first = store.month_slots();
        store.fetch_month_slots(&query).await;
        assert_eq!(store.month_slots(), first);
    }

    #[tokio::test]
    async fn day_resolution_uses_the_cache_and_sorts() {
        let provider = Arc::new(ScriptedProvider::default());
        // Provider order within a key is not meaningful.
        provider.push_ok(month_of(
            "2025-06-17",
            &[
                "2025-06-17T15:00:00Z",
                "2025-06-17T09:00:00Z",
                "2025-06-17T12:00:00Z",
            ],
        ));
        let store = SlotStore::new(provider.clone());
        let query = june_query(chrono_tz::UTC);

        store.fetch_month_slots(&query).await;
        let slots = store.fetch_slots(&query, date(2025, 6, 17)).await;

        assert_eq!(
            slots.iter().map(|s| s.start.as_str()).collect::<Vec<_>>(),
            vec![
                "2025-06-17T09:00:00Z",
                "2025-06-17T12:00:00Z",
                "2025-06-17T15:00:00Z",
            ]
        );
        // One month call only: the day was served from cache.
        assert_eq!(provider.calls().len(), 1);
        assert!(!store.loading());
        assert_eq!(store.available_slots(), slots);
    }

    #[tokio::test]
    async fn day_resolution_widens_by_one_day_on_cache_miss() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(MonthSlots::new()); // month fetch: nothing cached
        provider.push_ok(month_of("2025-06-16", &["2025-06-17T01:00:00Z"]));
        let store = SlotStore::new(provider.clone());
        let query = june_query(chrono_tz::UTC);

        store.fetch_month_slots(&query).await;
        let slots = store.fetch_slots(&query, date(2025, 6, 17)).await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], (date(2025, 6, 16), date(2025, 6, 18)));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, "2025-06-17T01:00:00Z");
    }

    #[tokio::test]
    async fn day_resolution_failure_is_empty_not_error() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_err("transport error");
        let store = SlotStore::new(provider);
        let query = june_query(chrono_tz::UTC);

        let slots = store.fetch_slots(&query, date(2025, 6, 17)).await;
        assert!(slots.is_empty());
        assert!(store.available_slots().is_empty());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn near_midnight_slot_lands_on_different_days_per_zone() {
        let cache = month_of("2025-06-17", &["2025-06-17T23:30:00Z"]);

        let la = slots_for_local_date(&cache, date(2025, 6, 17), chrono_tz::America::Los_Angeles);
        assert_eq!(la.len(), 1);

        let tokyo_17 = slots_for_local_date(&cache, date(2025, 6, 17), chrono_tz::Asia::Tokyo);
        assert!(tokyo_17.is_empty());
        let tokyo_18 = slots_for_local_date(&cache, date(2025, 6, 18), chrono_tz::Asia::Tokyo);
        assert_eq!(tokyo_18.len(), 1);
    }

    #[tokio::test]
    async fn stale_month_completion_is_discarded() {
        let provider = Arc::new(GatedProvider {
            calls: AtomicUsize::new(0),
            first_started: Notify::new(),
            gate: Notify::new(),
            slow: month_of("2025-06-10", &["2025-06-10T08:00:00Z"]),
            fast: month_of("2025-07-10", &["2025-07-10T08:00:00Z"]),
        });
        let store = Arc::new(SlotStore::new(provider.clone()));

        let slow_store = store.clone();
        let slow_query = june_query(chrono_tz::UTC);
        let slow_task =
            tokio::spawn(async move { slow_store.fetch_month_slots(&slow_query).await });

        // Wait until the first request has claimed its ticket and parked.
        provider.first_started.notified().await;

        let fast_query = ViewQuery {
            month: date(2025, 7, 1),
            ..june_query(chrono_tz::UTC)
        };
        store.fetch_month_slots(&fast_query).await;
        assert!(store.month_slots().contains_key("2025-07-10"));

        // Release the slow response; it must not overwrite the newer cache.
        provider.gate.notify_one();
        slow_task.await.unwrap();
        assert!(store.month_slots().contains_key("2025-07-10"));
        assert!(!store.month_slots().contains_key("2025-06-10"));
    }
}
