//! Notification port for record updates.
//!
//! The surrounding system broadcasts attendance changes (live
//! dashboards, socket feeds). The engine models that collaborator as
//! an injected interface so the core stays testable without one.

use async_trait::async_trait;

use crate::models::AttendanceRecord;

/// Receives every record the service successfully persists.
///
/// Fired after the write lands, while the record's advisory lock is
/// still held, so notifications for one record arrive in commit order.
/// The service does not depend on the notifier's outcome;
/// implementations handle their own delivery failures.
#[async_trait]
pub trait AttendanceNotifier: Send + Sync {
    /// Called with the record as it was persisted.
    async fn record_updated(&self, record: &AttendanceRecord);
}

/// A notifier that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl AttendanceNotifier for NoopNotifier {
    async fn record_updated(&self, _record: &AttendanceRecord) {}
}
