//! Storage port for attendance records.
//!
//! The engine owns the read-modify-write cycle but not the storage
//! itself; hosts plug in a backend through [`AttendanceStore`]. The
//! port enforces optimistic concurrency with a version counter so
//! concurrent writers cannot silently clobber each other's entries.
//! [`InMemoryAttendanceStore`] is the reference implementation used by
//! tests and embedding hosts without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{AttendanceRecord, DateRange};

/// Errors surfaced by an attendance store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored version moved between load and save.
    #[error(
        "version conflict for worker '{worker_id}' on {day}: expected version {expected}, found {actual}"
    )]
    VersionConflict {
        /// The worker whose record was contended.
        worker_id: String,
        /// The logical work-day of the contended record.
        day: NaiveDate,
        /// The version the writer expected to replace.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },

    /// The backend itself failed.
    #[error("{0}")]
    Backend(String),
}

/// A record together with the storage version it was loaded at.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// The stored record.
    pub record: AttendanceRecord,
    /// The version to pass back as `expected_version` when saving.
    pub version: u64,
}

/// Persistence port for attendance records.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Loads the record for a (worker, day) pair, if one exists.
    async fn load(
        &self,
        worker_id: &str,
        day: NaiveDate,
    ) -> Result<Option<StoredRecord>, StoreError>;

    /// Persists a record under optimistic concurrency.
    ///
    /// `expected_version` is the version the record was loaded at, or 0
    /// for a record that must not exist yet. On a mismatch the save
    /// fails with [`StoreError::VersionConflict`] and stores nothing.
    ///
    /// # Returns
    ///
    /// The new stored version.
    async fn save(
        &self,
        record: &AttendanceRecord,
        expected_version: u64,
    ) -> Result<u64, StoreError>;

    /// Loads all of a worker's records whose day falls within the
    /// inclusive range, ordered by day.
    async fn load_range(
        &self,
        worker_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// In-memory store keyed by (worker, day).
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<HashMap<(String, NaiveDate), StoredRecord>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryAttendanceStore {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn load(
        &self,
        worker_id: &str,
        day: NaiveDate,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&(worker_id.to_string(), day)).cloned())
    }

    async fn save(
        &self,
        record: &AttendanceRecord,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let key = (record.worker_id.clone(), record.day);

        let actual = records.get(&key).map(|stored| stored.version).unwrap_or(0);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                worker_id: record.worker_id.clone(),
                day: record.day,
                expected: expected_version,
                actual,
            });
        }

        let version = actual + 1;
        records.insert(
            key,
            StoredRecord {
                record: record.clone(),
                version,
            },
        );
        Ok(version)
    }

    async fn load_range(
        &self,
        worker_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.read().await;
        let mut found: Vec<AttendanceRecord> = records
            .iter()
            .filter(|(key, _)| key.0 == worker_id && range.contains(key.1))
            .map(|(_, stored)| stored.record.clone())
            .collect();
        found.sort_by_key(|record| record.day);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = InMemoryAttendanceStore::new();
        let record = AttendanceRecord::new("worker_001", make_date("2026-03-02"));

        let version = store.save(&record, 0).await.unwrap();
        assert_eq!(version, 1);

        let stored = store
            .load("worker_001", make_date("2026-03-02"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.record, record);
    }

    #[tokio::test]
    async fn test_load_missing_record_is_none() {
        let store = InMemoryAttendanceStore::new();

        let stored = store
            .load("worker_001", make_date("2026-03-02"))
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_version_advances_on_every_save() {
        let store = InMemoryAttendanceStore::new();
        let record = AttendanceRecord::new("worker_001", make_date("2026-03-02"));

        assert_eq!(store.save(&record, 0).await.unwrap(), 1);
        assert_eq!(store.save(&record, 1).await.unwrap(), 2);
        assert_eq!(store.save(&record, 2).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_stale_expected_version_conflicts() {
        let store = InMemoryAttendanceStore::new();
        let record = AttendanceRecord::new("worker_001", make_date("2026-03-02"));

        store.save(&record, 0).await.unwrap();
        store.save(&record, 1).await.unwrap();

        // A writer that loaded at version 1 lost the race
        let result = store.save(&record, 1).await;
        match result {
            Err(StoreError::VersionConflict {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected VersionConflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_conflicts_when_record_exists() {
        let store = InMemoryAttendanceStore::new();
        let record = AttendanceRecord::new("worker_001", make_date("2026-03-02"));

        store.save(&record, 0).await.unwrap();

        let result = store.save(&record, 0).await;
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict { actual: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_load_range_filters_and_orders() {
        let store = InMemoryAttendanceStore::new();
        for day in ["2026-03-04", "2026-03-02", "2026-03-10"] {
            let record = AttendanceRecord::new("worker_001", make_date(day));
            store.save(&record, 0).await.unwrap();
        }
        let other = AttendanceRecord::new("worker_002", make_date("2026-03-03"));
        store.save(&other, 0).await.unwrap();

        let range = DateRange::new(make_date("2026-03-01"), make_date("2026-03-08"));
        let records = store.load_range("worker_001", &range).await.unwrap();

        let days: Vec<NaiveDate> = records.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![make_date("2026-03-02"), make_date("2026-03-04")]);
        assert!(records.iter().all(|r| r.worker_id == "worker_001"));
    }
}
