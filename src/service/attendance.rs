//! The attendance service façade.
//!
//! This module sequences the tracking functions over the storage and
//! notification ports: resolve the logical day, load the record, apply
//! the event, recompute, persist, notify. It owns the concurrency
//! discipline for records; nothing else may persist them.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TrackingPolicy;
use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{
    AttendanceRecord, AttendanceSummary, DateRange, EntryKind, EntrySource, ReportPeriod,
    SessionStatus, TimeEntry,
};
use crate::tracking;

use super::locks::RecordLocks;
use super::notifier::AttendanceNotifier;
use super::store::{AttendanceStore, StoreError};

/// Sequences attendance events against storage.
///
/// Every mutation runs as read-modify-write under a per-(worker, day)
/// advisory lock, with the store's version check as the cross-process
/// backstop: a conflicted save is reloaded, reapplied, and re-persisted
/// up to the policy's attempt budget. Timestamps are taken as the
/// caller supplies them; the engine does not second-guess clocks.
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    notifier: Arc<dyn AttendanceNotifier>,
    policy: TrackingPolicy,
    locks: RecordLocks,
}

impl AttendanceService {
    /// Creates a service over a store and a notifier.
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        notifier: Arc<dyn AttendanceNotifier>,
        policy: TrackingPolicy,
    ) -> Self {
        AttendanceService {
            store,
            notifier,
            policy,
            locks: RecordLocks::new(),
        }
    }

    /// Returns the policy the service runs under.
    pub fn policy(&self) -> &TrackingPolicy {
        &self.policy
    }

    /// Records a login event.
    ///
    /// The event lands on the logical day of its timestamp. A login
    /// while a session is open becomes a `break_end`; otherwise it is a
    /// `check_in`. Returns the persisted record.
    pub async fn record_login(
        &self,
        worker_id: &str,
        user_id: &str,
        time: NaiveDateTime,
    ) -> AttendanceResult<AttendanceRecord> {
        let correlation_id = Uuid::new_v4();
        let day = tracking::resolve_work_day(time, &self.policy);

        let _guard = self.locks.acquire(worker_id, day).await;
        let (record, _) = self
            .mutate_record(worker_id, day, correlation_id, |record| {
                let classification = tracking::classify_login(record.status);
                let entry = TimeEntry::new(classification.kind, time, EntrySource::Login);
                tracking::apply_classified(record, entry, classification.end_of_day);
                tracking::recompute(record);
            })
            .await?;

        info!(
            correlation_id = %correlation_id,
            worker_id = %worker_id,
            user_id = %user_id,
            day = %day,
            status = %record.status,
            "Login recorded"
        );
        self.notifier.record_updated(&record).await;
        Ok(record)
    }

    /// Records a logout event.
    ///
    /// A logout that finds the previous calendar day still checked in
    /// closes that day at its boundary instead (see
    /// [`tracking::close_at_day_boundary`]); when the logout itself
    /// falls before the cutover, a spillover check-in is persisted on
    /// the new day. Otherwise the logout is classified by time of day
    /// as an end-of-day `check_out` or a `break_start` and appended to
    /// its logical day's record. Returns the record the logout landed
    /// on (the closed previous day when the cross-day path fires).
    pub async fn record_logout(
        &self,
        worker_id: &str,
        user_id: &str,
        time: NaiveDateTime,
    ) -> AttendanceResult<AttendanceRecord> {
        let correlation_id = Uuid::new_v4();
        let event_date = time.date();
        let previous_day = event_date.pred_opt().expect("date within supported range");

        // Both candidate days lock up front, older first, so the close
        // and its spillover cannot interleave with another writer.
        let _guards = self
            .locks
            .acquire_pair(worker_id, previous_day, event_date)
            .await;

        let closed_previous = match self.store.load(worker_id, previous_day).await? {
            Some(stored) if stored.record.status == SessionStatus::CheckedIn => {
                let (closed, adjustment) = self
                    .mutate_record(worker_id, previous_day, correlation_id, |record| {
                        tracking::close_at_day_boundary(record, time)
                    })
                    .await?;
                adjustment.map(|_| closed)
            }
            _ => None,
        };

        if let Some(closed) = closed_previous {
            let spill_time = tracking::spillover_check_in(time, &self.policy);
            if let Some(spill_time) = spill_time {
                let (spillover, _) = self
                    .mutate_record(worker_id, event_date, correlation_id, |record| {
                        let entry =
                            TimeEntry::new(EntryKind::CheckIn, spill_time, EntrySource::Auto);
                        tracking::apply_classified(record, entry, false);
                        tracking::recompute(record);
                    })
                    .await?;
                self.notifier.record_updated(&spillover).await;
            }

            warn!(
                correlation_id = %correlation_id,
                worker_id = %worker_id,
                user_id = %user_id,
                day = %previous_day,
                spillover = spill_time.is_some(),
                "Cross-day logout closed the previous day at its boundary"
            );
            self.notifier.record_updated(&closed).await;
            return Ok(closed);
        }

        let day = tracking::resolve_work_day(time, &self.policy);
        let classification = tracking::classify_logout(time, &self.policy);
        let (record, _) = self
            .mutate_record(worker_id, day, correlation_id, |record| {
                let entry = TimeEntry::new(classification.kind, time, EntrySource::Logout);
                tracking::apply_classified(record, entry, classification.end_of_day);
                tracking::recompute(record);
            })
            .await?;

        info!(
            correlation_id = %correlation_id,
            worker_id = %worker_id,
            user_id = %user_id,
            day = %day,
            kind = %classification.kind,
            status = %record.status,
            "Logout recorded"
        );
        self.notifier.record_updated(&record).await;
        Ok(record)
    }

    /// Records a manual correction entry.
    ///
    /// The kind arrives as a string from the correction surface and is
    /// validated before anything is written. The entry is appended
    /// verbatim with source `manual` and the status is forced to match
    /// its kind. The entry lands on the logical day of its timestamp
    /// unless `target_day` pins a specific record.
    pub async fn record_manual_entry(
        &self,
        worker_id: &str,
        user_id: &str,
        kind: &str,
        time: NaiveDateTime,
        note: Option<String>,
        target_day: Option<NaiveDate>,
    ) -> AttendanceResult<AttendanceRecord> {
        let correlation_id = Uuid::new_v4();

        let kind = match kind.parse::<EntryKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!(
                    correlation_id = %correlation_id,
                    worker_id = %worker_id,
                    user_id = %user_id,
                    kind = %kind,
                    "Rejected manual entry with unknown kind"
                );
                return Err(AttendanceError::InvalidEntryKind {
                    kind: kind.to_string(),
                });
            }
        };

        let day = target_day.unwrap_or_else(|| tracking::resolve_work_day(time, &self.policy));

        let _guard = self.locks.acquire(worker_id, day).await;
        let (record, _) = self
            .mutate_record(worker_id, day, correlation_id, |record| {
                let entry = TimeEntry::with_note(kind, time, EntrySource::Manual, note.clone());
                tracking::apply_manual(record, entry);
                tracking::recompute(record);
            })
            .await?;

        info!(
            correlation_id = %correlation_id,
            worker_id = %worker_id,
            user_id = %user_id,
            day = %day,
            kind = %kind,
            status = %record.status,
            "Manual entry recorded"
        );
        self.notifier.record_updated(&record).await;
        Ok(record)
    }

    /// Fetches the record for a (worker, day) pair.
    ///
    /// A day with no activity yields a zeroed `checked_out` record;
    /// nothing is persisted by reading. Records only materialize in
    /// storage on their first event.
    pub async fn record_for_day(
        &self,
        worker_id: &str,
        day: NaiveDate,
    ) -> AttendanceResult<AttendanceRecord> {
        let stored = self.store.load(worker_id, day).await?;
        Ok(stored
            .map(|stored| stored.record)
            .unwrap_or_else(|| AttendanceRecord::new(worker_id, day)))
    }

    /// Aggregates a worker's records over an inclusive date range.
    pub async fn summary(
        &self,
        worker_id: &str,
        range: &DateRange,
    ) -> AttendanceResult<AttendanceSummary> {
        let records = self.store.load_range(worker_id, range).await?;
        Ok(AttendanceSummary::from_records(&records))
    }

    /// Aggregates a worker's records over a calendar period around a
    /// reference date.
    pub async fn summary_for_period(
        &self,
        worker_id: &str,
        period: ReportPeriod,
        reference: NaiveDate,
    ) -> AttendanceResult<AttendanceSummary> {
        let range = period.resolve(reference);
        info!(
            worker_id = %worker_id,
            period = %period,
            start_date = %range.start_date,
            end_date = %range.end_date,
            "Resolved summary period"
        );
        self.summary(worker_id, &range).await
    }

    /// Loads (or lazily creates) a record, applies `mutate`, and
    /// persists under optimistic concurrency.
    ///
    /// On a version conflict the whole cycle reruns against a fresh
    /// load, up to the policy's attempt budget; the closure must be
    /// safe to reapply. The caller holds the (worker, day) advisory
    /// lock, so conflicts only come from writers outside this process.
    async fn mutate_record<T, F>(
        &self,
        worker_id: &str,
        day: NaiveDate,
        correlation_id: Uuid,
        mutate: F,
    ) -> AttendanceResult<(AttendanceRecord, T)>
    where
        F: Fn(&mut AttendanceRecord) -> T,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let stored = self.store.load(worker_id, day).await?;
            let (mut record, version) = match stored {
                Some(stored) => (stored.record, stored.version),
                None => (AttendanceRecord::new(worker_id, day), 0),
            };

            let outcome = mutate(&mut record);

            match self.store.save(&record, version).await {
                Ok(_) => return Ok((record, outcome)),
                Err(StoreError::VersionConflict { .. })
                    if attempt < self.policy.persist_retry_limit =>
                {
                    warn!(
                        correlation_id = %correlation_id,
                        worker_id = %worker_id,
                        day = %day,
                        attempt = attempt,
                        "Version conflict, reloading and reapplying"
                    );
                }
                Err(StoreError::VersionConflict { .. }) => {
                    warn!(
                        correlation_id = %correlation_id,
                        worker_id = %worker_id,
                        day = %day,
                        attempts = attempt,
                        "Write conflict persisted past the retry budget"
                    );
                    return Err(AttendanceError::WriteConflict {
                        worker_id: worker_id.to_string(),
                        day,
                        attempts: attempt,
                    });
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}
