//! Per-record advisory locking.
//!
//! Serializes same-process writers on a (worker, day) key so their
//! load/persist cycles cannot interleave. The store's version check
//! remains the backstop for writers outside this process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per touched (worker, day) key.
///
/// Entries are small and persist for the registry's lifetime; an
/// embedded engine touches few enough keys for that to stay cheap.
#[derive(Debug, Default)]
pub(crate) struct RecordLocks {
    registry: Mutex<HashMap<(String, NaiveDate), Arc<Mutex<()>>>>,
}

impl RecordLocks {
    pub(crate) fn new() -> Self {
        RecordLocks {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires the exclusion for one (worker, day) key.
    pub(crate) async fn acquire(&self, worker_id: &str, day: NaiveDate) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.registry.lock().await;
            registry
                .entry((worker_id.to_string(), day))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Acquires two distinct day keys for one worker, older day first.
    ///
    /// The fixed order keeps concurrent cross-day operations from
    /// deadlocking against each other. The days must differ.
    pub(crate) async fn acquire_pair(
        &self,
        worker_id: &str,
        day_a: NaiveDate,
        day_b: NaiveDate,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert!(day_a != day_b, "pair acquisition needs two distinct days");
        let (older, newer) = if day_a < day_b {
            (day_a, day_b)
        } else {
            (day_b, day_a)
        };
        let older_guard = self.acquire(worker_id, older).await;
        let newer_guard = self.acquire(worker_id, newer).await;
        (older_guard, newer_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_same_key_excludes_second_acquirer() {
        let locks = RecordLocks::new();
        let day = make_date("2026-03-02");

        let guard = locks.acquire("worker_001", day).await;

        let blocked = timeout(Duration::from_millis(20), locks.acquire("worker_001", day)).await;
        assert!(blocked.is_err());

        drop(guard);
        let reacquired =
            timeout(Duration::from_millis(20), locks.acquire("worker_001", day)).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = RecordLocks::new();
        let day = make_date("2026-03-02");

        let _held = locks.acquire("worker_001", day).await;

        let other_day = timeout(
            Duration::from_millis(20),
            locks.acquire("worker_001", make_date("2026-03-03")),
        )
        .await;
        assert!(other_day.is_ok());

        let other_worker =
            timeout(Duration::from_millis(20), locks.acquire("worker_002", day)).await;
        assert!(other_worker.is_ok());
    }

    #[tokio::test]
    async fn test_pair_holds_both_days() {
        let locks = RecordLocks::new();
        let older = make_date("2026-03-02");
        let newer = make_date("2026-03-03");

        // Caller order does not matter; both keys end up held
        let _guards = locks.acquire_pair("worker_001", newer, older).await;

        for day in [older, newer] {
            let blocked =
                timeout(Duration::from_millis(20), locks.acquire("worker_001", day)).await;
            assert!(blocked.is_err());
        }
    }
}
