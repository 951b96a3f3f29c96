use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Booking;

/// Persistence for bookings. Writes are serialized per booking through
/// optimistic versioning; the store bumps `version` on every successful
/// update and rejects stale writers.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError>;

    /// Compare-and-swap: applies `booking` only if the stored version
    /// still equals `expected_version`. Returns the stored row with its
    /// bumped version.
    async fn update(
        &self,
        booking: Booking,
        expected_version: u64,
    ) -> Result<Booking, RepositoryError>;

    /// Pending bookings whose scheduled time has passed, for the expiry
    /// sweep. Already-expired bookings are never returned, which is what
    /// makes the sweep idempotent.
    async fn list_overdue_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Booking>, RepositoryError>;

    /// Active (pending or confirmed) bookings for a provider at an exact
    /// slot time, for occupancy checks. `exclude` leaves one booking out
    /// of the count, so a reschedule does not count its own row.
    async fn count_active_at(
        &self,
        provider_id: Uuid,
        scheduled_at: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<u32, RepositoryError>;

    /// Administrative hard delete, outside the lifecycle. Implementations
    /// must audit-log it.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Version conflict on booking {id}: expected {expected}, actual {actual}")]
    VersionConflict {
        id: Uuid,
        expected: u64,
        actual: u64,
    },

    #[error("Storage backend failure: {0}")]
    Backend(String),
}
